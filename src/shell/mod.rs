//! Shell Module
//!
//! Everything that produces text the client's shell will evaluate.

mod alias;
mod rotation;
mod script;

pub use alias::{format_alias_line, format_aliases};
pub use rotation::ValueSelector;
pub use script::{
    escape_export_value, export_line, is_shell_identifier, render_script, INVALID_TOKEN_WARNING,
};
