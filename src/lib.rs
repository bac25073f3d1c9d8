pub mod auth;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod flags;
pub mod library;
pub mod session;

pub use library::{CommandLibrary, DispatchOutcome, LibrarySettings};

#[cfg(test)]
pub mod test_helpers;
