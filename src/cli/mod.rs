//! CLI infrastructure for the gearbox match runner
//!
//! This module provides the command-line interface for playing single
//! matches turn by turn and simulating longer matches for standings.

pub mod commands;
pub mod config;
pub mod output;
