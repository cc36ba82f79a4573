//! Library side of the `norsand` binary: configuration loading, flag
//! overrides, and the subcommand implementations.

pub mod commands;
pub mod logging;
pub mod settings;
