//! Common constants for developer registry modules.

pub struct ContentType;
pub struct DbEngine;

impl ContentType {
    pub const JSON: &'static str = "application/json";
}

impl DbEngine {
    pub const SQLITE: &'static str = "sqlite";
}
