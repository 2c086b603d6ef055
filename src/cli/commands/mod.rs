//! Subcommands of the `gearbox` binary

pub mod play;
pub mod simulate;
