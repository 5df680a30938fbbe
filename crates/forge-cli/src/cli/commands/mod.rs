//! CLI command handlers.

mod new;

pub use new::run_new;
