//! # Testdash Server Library
//!
//! Command-line parsing and command execution for the `testdash-cache`
//! administration binary.

pub mod cli;
pub mod commands;
pub mod startup;
