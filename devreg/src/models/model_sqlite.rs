//! Pure SQLite model.

use std::{error::Error as StdError, sync::Arc};

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{
    developer, level,
    sqlite::{
        conn::{self, Options},
        developer::Model as DeveloperModel,
        level::Model as LevelModel,
        user::Model as UserModel,
    },
    user,
};

/// Pure SQLite model.
#[derive(Clone)]
pub struct Model {
    conn: Arc<SqlitePool>,
    user: Arc<UserModel>,
    level: Arc<LevelModel>,
    developer: Arc<DeveloperModel>,
}

impl Model {
    /// Create an instance.
    pub async fn new(opts: &Options) -> Result<Self, Box<dyn StdError>> {
        let conn = Arc::new(conn::connect(opts).await?);
        Ok(Model {
            conn: conn.clone(),
            user: Arc::new(UserModel::new(conn.clone()).await?),
            level: Arc::new(LevelModel::new(conn.clone()).await?),
            developer: Arc::new(DeveloperModel::new(conn.clone()).await?),
        })
    }

    /// Get the raw database connection ([`SqlitePool`]).
    pub fn get_connection(&self) -> &SqlitePool {
        &self.conn
    }
}

#[async_trait]
impl super::Model for Model {
    async fn close(&self) -> Result<(), Box<dyn StdError>> {
        self.conn.close().await;
        Ok(())
    }

    fn user(&self) -> &dyn user::UserModel {
        self.user.as_ref()
    }

    fn level(&self) -> &dyn level::LevelModel {
        self.level.as_ref()
    }

    fn developer(&self) -> &dyn developer::DeveloperModel {
        self.developer.as_ref()
    }
}
