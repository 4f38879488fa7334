//! Common libraries of the developer registry modules.
//!
//! - `constants`: cross-module constants.
//! - `err`: the standard error response type.
//! - `http`: axum extractors that reject with the standard error responses.
//! - `logger`: the console logger and its configurations.
//! - `server_config`: the top level `server` configurations.
//! - `strings`: string and time utilities.

pub mod constants;
pub mod err;
pub mod http;
pub mod logger;
pub mod server_config;
pub mod strings;
