//! Support library for the `acme` demonstration binary.
//!
//! Exposes the command pipeline, wiring configuration and logging setup so
//! tests can drive the CLI without forking a subprocess.

pub mod cli;
pub mod config;
pub mod logging;
