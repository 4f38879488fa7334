//! Traits and implementations for accessing the database.
//!
//! Currently we only provide the pure SQLite implementation. The `Model` trait and the
//! [`ConnOptions`] enumeration keep the engine pluggable.

use std::{error::Error as StdError, sync::Arc};

use async_trait::async_trait;

pub mod developer;
pub mod level;
pub mod user;

mod model_sqlite;
mod sqlite;

pub use self::sqlite::conn::{self as sqlite_conn, Options as SqliteOptions};
pub use model_sqlite::Model as SqliteModel;

/// Database connection options for model implementation.
pub enum ConnOptions {
    /// Pure SQLite model implementation.
    Sqlite(SqliteOptions),
}

/// The top level trait to get all models (tables/collections).
#[async_trait]
pub trait Model: Send + Sync {
    /// Close database connection.
    async fn close(&self) -> Result<(), Box<dyn StdError>>;

    /// To get the user model.
    fn user(&self) -> &dyn user::UserModel;

    /// To get the level model.
    fn level(&self) -> &dyn level::LevelModel;

    /// To get the developer model.
    fn developer(&self) -> &dyn developer::DeveloperModel;
}

/// To create the database model with the specified database implementation.
pub async fn new(opts: &ConnOptions) -> Result<Arc<dyn Model>, Box<dyn StdError>> {
    let model: Arc<dyn Model> = match opts {
        ConnOptions::Sqlite(opts) => Arc::new(SqliteModel::new(opts).await?),
    };
    model.user().init().await?;
    model.level().init().await?;
    model.developer().init().await?;
    Ok(model)
}
