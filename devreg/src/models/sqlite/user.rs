use std::{error::Error as StdError, sync::Arc};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use sql_builder::{SqlBuilder, quote};
use sqlx::SqlitePool;

use super::{
    super::user::{
        ListOptions, ListQueryCond, NewUser, QueryCond, SortKey, Updates, User, UserModel,
    },
    build_where_search,
};

/// Model instance.
pub struct Model {
    /// The associated database connection.
    conn: Arc<SqlitePool>,
}

/// SQLite schema.
#[derive(sqlx::FromRow)]
struct Schema {
    id: i64,
    name: String,
    email: String,
    /// i64 as time tick from Epoch in milliseconds.
    created_at: i64,
    /// i64 as time tick from Epoch in milliseconds.
    updated_at: i64,
}

/// Use "COUNT(*)" instead of "COUNT(fields...)" to simplify the implementation.
#[derive(sqlx::FromRow)]
struct CountSchema {
    #[sqlx(rename = "COUNT(*)")]
    count: i64,
}

const TABLE_NAME: &'static str = "user";
const FIELDS: &'static [&'static str] = &["id", "name", "email", "created_at", "updated_at"];
const SEARCH_FIELDS: &'static [&'static str] = &["name", "email"];
const TABLE_INIT_SQL: &'static str = "\
    CREATE TABLE IF NOT EXISTS user (\
    id INTEGER PRIMARY KEY AUTOINCREMENT,\
    name TEXT NOT NULL,\
    email TEXT NOT NULL UNIQUE,\
    created_at INTEGER NOT NULL,\
    updated_at INTEGER NOT NULL)";

impl Model {
    /// To create the model instance with a database connection.
    pub async fn new(conn: Arc<SqlitePool>) -> Result<Self, Box<dyn StdError>> {
        let model = Model { conn };
        model.init().await?;
        Ok(model)
    }
}

#[async_trait]
impl UserModel for Model {
    async fn init(&self) -> Result<(), Box<dyn StdError>> {
        let _ = sqlx::query(TABLE_INIT_SQL)
            .execute(self.conn.as_ref())
            .await?;
        Ok(())
    }

    async fn count(&self, cond: &ListQueryCond) -> Result<u64, Box<dyn StdError>> {
        let sql = build_list_where(SqlBuilder::select_from(TABLE_NAME).count("*"), &cond).sql()?;

        let result: Result<CountSchema, sqlx::Error> = sqlx::query_as(sql.as_str())
            .fetch_one(self.conn.as_ref())
            .await;

        let row = match result {
            Err(e) => {
                return Err(Box::new(e));
            }
            Ok(row) => row,
        };
        Ok(row.count as u64)
    }

    async fn list(&self, opts: &ListOptions) -> Result<(Vec<User>, u64), Box<dyn StdError>> {
        let count = self.count(opts.cond).await?;

        let mut builder = SqlBuilder::select_from(TABLE_NAME);
        build_limit_offset(&mut builder, &opts);
        build_sort(&mut builder, &opts);
        let sql = build_list_where(&mut builder, opts.cond).sql()?;

        let mut rows = sqlx::query_as::<_, Schema>(sql.as_str()).fetch(self.conn.as_ref());

        let mut list = vec![];
        while let Some(row) = rows.try_next().await? {
            list.push(User {
                id: row.id,
                name: row.name,
                email: row.email,
                created_at: Utc.timestamp_nanos(row.created_at * 1000000),
                updated_at: Utc.timestamp_nanos(row.updated_at * 1000000),
            });
        }
        Ok((list, count))
    }

    async fn get(&self, cond: &QueryCond) -> Result<Option<User>, Box<dyn StdError>> {
        let sql = build_where(SqlBuilder::select_from(TABLE_NAME).fields(FIELDS), &cond).sql()?;

        let result: Result<Schema, sqlx::Error> = sqlx::query_as(sql.as_str())
            .fetch_one(self.conn.as_ref())
            .await;

        let row = match result {
            Err(e) => match e {
                sqlx::Error::RowNotFound => return Ok(None),
                _ => return Err(Box::new(e)),
            },
            Ok(row) => row,
        };

        Ok(Some(User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: Utc.timestamp_nanos(row.created_at * 1000000),
            updated_at: Utc.timestamp_nanos(row.updated_at * 1000000),
        }))
    }

    async fn add(&self, user: &NewUser) -> Result<i64, Box<dyn StdError>> {
        let values = vec![
            quote(user.name),
            quote(user.email.to_lowercase().as_str()),
            user.created_at.timestamp_millis().to_string(),
            user.updated_at.timestamp_millis().to_string(),
        ];
        let sql = SqlBuilder::insert_into(TABLE_NAME)
            .fields(&["name", "email", "created_at", "updated_at"])
            .values(&values)
            .sql()?;
        let result = sqlx::query(sql.as_str())
            .execute(self.conn.as_ref())
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn del(&self, id: i64) -> Result<u64, Box<dyn StdError>> {
        let sql = SqlBuilder::delete_from(TABLE_NAME)
            .and_where_eq("id", id)
            .sql()?;
        let result = sqlx::query(sql.as_str())
            .execute(self.conn.as_ref())
            .await?;
        Ok(result.rows_affected())
    }

    async fn update(&self, id: i64, updates: &Updates) -> Result<u64, Box<dyn StdError>> {
        let sql = match build_update_where(&mut SqlBuilder::update_table(TABLE_NAME), id, updates) {
            None => return Ok(0),
            Some(builder) => builder.sql()?,
        };
        let result = sqlx::query(sql.as_str())
            .execute(self.conn.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}

/// Transforms query conditions to the SQL builder.
fn build_where<'a>(builder: &'a mut SqlBuilder, cond: &QueryCond<'a>) -> &'a mut SqlBuilder {
    if let Some(value) = cond.id {
        builder.and_where_eq("id", value);
    }
    if let Some(value) = cond.email {
        builder.and_where_eq("email", quote(value.to_lowercase().as_str()));
    }
    builder
}

/// Transforms query conditions to the SQL builder.
fn build_list_where<'a>(
    builder: &'a mut SqlBuilder,
    cond: &ListQueryCond<'a>,
) -> &'a mut SqlBuilder {
    if let Some(value) = cond.search_contains {
        build_where_search(builder, SEARCH_FIELDS, value.to_lowercase().as_str());
    }
    builder
}

/// Transforms model options to the SQL builder.
fn build_limit_offset<'a>(builder: &'a mut SqlBuilder, opts: &ListOptions) -> &'a mut SqlBuilder {
    if let Some(value) = opts.limit {
        if value > 0 {
            builder.limit(value);
        }
    }
    if let Some(value) = opts.offset {
        match opts.limit {
            None => builder.limit(-1).offset(value),
            Some(0) => builder.limit(-1).offset(value),
            _ => builder.offset(value),
        };
    }
    builder
}

/// Transforms model options to the SQL builder.
fn build_sort<'a>(builder: &'a mut SqlBuilder, opts: &ListOptions) -> &'a mut SqlBuilder {
    if let Some(sort_cond) = opts.sort.as_ref() {
        for cond in sort_cond.iter() {
            let key = match cond.key {
                SortKey::Id => "id",
                SortKey::Name => "name",
                SortKey::Email => "email",
                SortKey::CreatedAt => "created_at",
                SortKey::UpdatedAt => "updated_at",
            };
            builder.order_by(key, !cond.asc);
        }
    }
    builder
}

/// Transforms query conditions and the model object to the SQL builder.
fn build_update_where<'a>(
    builder: &'a mut SqlBuilder,
    id: i64,
    updates: &Updates,
) -> Option<&'a mut SqlBuilder> {
    let mut count = 0;
    if let Some(value) = updates.name {
        builder.set("name", quote(value));
        count += 1;
    }
    if let Some(value) = updates.email {
        builder.set("email", quote(value.to_lowercase().as_str()));
        count += 1;
    }
    if let Some(value) = updates.updated_at.as_ref() {
        builder.set("updated_at", value.timestamp_millis());
        count += 1;
    }
    if count == 0 {
        return None;
    }

    builder.and_where_eq("id", id);
    Some(builder)
}
