//! Response models for the sharenv API

pub mod responses;

pub use responses::HealthResponse;
