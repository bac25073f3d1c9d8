//! Command registration model.
//!
//! # Architecture
//!
//! - `types`: commands, options and the per-invocation context
//! - `registry`: ordered, name-unique command storage
//! - `render`: help listing and syntax error replies

mod registry;
mod render;
mod types;

pub use registry::CommandRegistry;
pub use render::{format_help, format_missing_options};
pub use types::{
    Command, CommandHandler, CommandOption, CommandSpec, ExecutionContext, HandlerResult,
    OptionValues,
};
