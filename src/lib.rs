//! GameOn runtime: bootstrap (config, tracing, wiring) and the interactive shell.

pub mod bootstrap;
pub mod shell;
