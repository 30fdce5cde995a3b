//! taptally library
//!
//! This module exports the command line configuration and reporting of
//! taptally for use in integration tests and as a library.

pub mod config;
pub mod report;
