//! Support library for the `labelmatch` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and unit tests
//! can drive an evaluation without spawning a subprocess.

pub mod cli;
pub mod logging;
