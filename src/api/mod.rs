//! API Module
//!
//! HTTP handlers and routing for the sharenv server.
//!
//! # Endpoints
//! - `GET /` - Install instructions
//! - `GET /health` - Health check endpoint
//! - `GET /*token` - Shell script with exports and aliases

pub mod handlers;
pub mod install;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
