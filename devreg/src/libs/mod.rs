//! Libraries of the devreg module.

pub mod config;
