//! Command-line client for the trends dashboard API.
//!
//! Browses and moderates trends, inspects the filter catalog and manages
//! user accounts against a running server.

pub mod cli;
pub mod client;
pub mod commands;
pub mod display;
