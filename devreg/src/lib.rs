//! The developer registry service.
//!
//! This module provides REST-ful APIs to manage the following resources:
//!
//! - Users.
//! - Levels.
//! - Developers that belong to levels.
//!
//! All list APIs support pagination (`take`/`skip`), multi-key sorting and substring search.
//!
//! # Mount devreg in your axum App
//!
//! You can simply mount devreg into your axum App:
//!
//! ```ignore
//! use axum::Router;
//! use clap::Command as ClapCommand;
//! use devreg::{libs, routes};
//! use std::net::SocketAddr;
//! use tokio::{self, net::TcpListener};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let args = ClapCommand::new("your-project-name").get_matches();
//!
//!     let conf = libs::config::read_args(&args);
//!     let state = match routes::new_state("/devreg", &conf).await {
//!         Err(e) => {
//!             println!("Error: {}", e);
//!             return Ok(());
//!         }
//!         Ok(state) => state,
//!     };
//!     let app = Router::new().merge(routes::new_service(&state));
//!     let listener = match TcpListener::bind("0.0.0.0:2080").await {
//!         Err(e) => {
//!             println!("Error: {}", e);
//!             return Ok(());
//!         }
//!         Ok(listener) => listener,
//!     };
//!     axum::serve(listener, app.into_make_service()).await
//! }
//! ```

pub mod libs;
pub mod models;
pub mod routes;
