//! Test harness for integration tests.
//!
//! Provides isolated test environments backed by real git repositories,
//! programmatic note file creation, and CLI assertion helpers using
//! `assert_cmd`.

mod command;
mod env;
mod note;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::NotegitCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use note::{TestNote, yaml_file};
