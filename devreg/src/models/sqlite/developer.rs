use std::{error::Error as StdError, sync::Arc};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use sql_builder::{SqlBuilder, quote};
use sqlx::SqlitePool;

use super::{
    super::developer::{
        Developer, DeveloperModel, ListOptions, ListQueryCond, NewDeveloper, QueryCond, SortKey,
        Updates,
    },
    build_where_search,
};

/// Model instance.
pub struct Model {
    /// The associated database connection.
    conn: Arc<SqlitePool>,
}

/// SQLite schema. All queries join `level` to fill the level name.
#[derive(sqlx::FromRow)]
struct Schema {
    id: i64,
    name: String,
    level_id: i64,
    /// NULL only when the associated level row is missing.
    level_name: Option<String>,
    gender: Option<String>,
    /// i64 as time tick from Epoch in milliseconds.
    birthdate: Option<i64>,
    hobby: Option<String>,
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

const TABLE_NAME: &'static str = "developer";
const FIELDS: &'static [&'static str] = &[
    "developer.id AS id",
    "developer.name AS name",
    "developer.level_id AS level_id",
    "level.name AS level_name",
    "developer.gender AS gender",
    "developer.birthdate AS birthdate",
    "developer.hobby AS hobby",
    "developer.created_at AS created_at",
    "developer.updated_at AS updated_at",
];
const SEARCH_FIELDS: &'static [&'static str] = &[
    "developer.name",
    "developer.gender",
    "developer.hobby",
    "level.name",
];
const TABLE_INIT_SQL: &'static str = "\
    CREATE TABLE IF NOT EXISTS developer (\
    id INTEGER PRIMARY KEY AUTOINCREMENT,\
    name TEXT NOT NULL,\
    level_id INTEGER NOT NULL,\
    gender TEXT,\
    birthdate INTEGER,\
    hobby TEXT,\
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
impl DeveloperModel for Model {
    async fn init(&self) -> Result<(), Box<dyn StdError>> {
        let _ = sqlx::query(TABLE_INIT_SQL)
            .execute(self.conn.as_ref())
            .await?;
        Ok(())
    }

    async fn count(&self, cond: &ListQueryCond) -> Result<u64, Box<dyn StdError>> {
        let mut builder = SqlBuilder::select_from(TABLE_NAME);
        builder.count("*");
        build_join(&mut builder);
        let sql = build_list_where(&mut builder, &cond).sql()?;

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

    async fn list(&self, opts: &ListOptions) -> Result<(Vec<Developer>, u64), Box<dyn StdError>> {
        let count = self.count(opts.cond).await?;

        let mut builder = SqlBuilder::select_from(TABLE_NAME);
        builder.fields(FIELDS);
        build_join(&mut builder);
        build_limit_offset(&mut builder, &opts);
        build_sort(&mut builder, &opts);
        let sql = build_list_where(&mut builder, opts.cond).sql()?;

        let mut rows = sqlx::query_as::<_, Schema>(sql.as_str()).fetch(self.conn.as_ref());

        let mut list = vec![];
        while let Some(row) = rows.try_next().await? {
            list.push(Developer {
                id: row.id,
                name: row.name,
                level_id: row.level_id,
                level_name: row.level_name.unwrap_or_default(),
                gender: row.gender,
                birthdate: match row.birthdate {
                    None => None,
                    Some(value) => Some(Utc.timestamp_nanos(value * 1000000)),
                },
                hobby: row.hobby,
                created_at: Utc.timestamp_nanos(row.created_at * 1000000),
                updated_at: Utc.timestamp_nanos(row.updated_at * 1000000),
            });
        }
        Ok((list, count))
    }

    async fn get(&self, cond: &QueryCond) -> Result<Option<Developer>, Box<dyn StdError>> {
        let mut builder = SqlBuilder::select_from(TABLE_NAME);
        builder.fields(FIELDS);
        build_join(&mut builder);
        let sql = build_where(&mut builder, &cond).sql()?;

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

        Ok(Some(Developer {
            id: row.id,
            name: row.name,
            level_id: row.level_id,
            level_name: row.level_name.unwrap_or_default(),
            gender: row.gender,
            birthdate: match row.birthdate {
                None => None,
                Some(value) => Some(Utc.timestamp_nanos(value * 1000000)),
            },
            hobby: row.hobby,
            created_at: Utc.timestamp_nanos(row.created_at * 1000000),
            updated_at: Utc.timestamp_nanos(row.updated_at * 1000000),
        }))
    }

    async fn add(&self, developer: &NewDeveloper) -> Result<i64, Box<dyn StdError>> {
        let values = vec![
            quote(developer.name),
            developer.level_id.to_string(),
            match developer.gender {
                None => "NULL".to_string(),
                Some(value) => quote(value),
            },
            match developer.birthdate {
                None => "NULL".to_string(),
                Some(value) => value.timestamp_millis().to_string(),
            },
            match developer.hobby {
                None => "NULL".to_string(),
                Some(value) => quote(value),
            },
            developer.created_at.timestamp_millis().to_string(),
            developer.updated_at.timestamp_millis().to_string(),
        ];
        let sql = SqlBuilder::insert_into(TABLE_NAME)
            .fields(&[
                "name",
                "level_id",
                "gender",
                "birthdate",
                "hobby",
                "created_at",
                "updated_at",
            ])
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

/// Joins the `level` table for the level name.
fn build_join(builder: &mut SqlBuilder) -> &mut SqlBuilder {
    builder
        .left()
        .join("level")
        .on("developer.level_id = level.id")
}

/// Transforms query conditions to the SQL builder.
fn build_where<'a>(builder: &'a mut SqlBuilder, cond: &QueryCond) -> &'a mut SqlBuilder {
    if let Some(value) = cond.id {
        builder.and_where_eq("developer.id", value);
    }
    builder
}

/// Transforms query conditions to the SQL builder.
fn build_list_where<'a>(
    builder: &'a mut SqlBuilder,
    cond: &ListQueryCond<'a>,
) -> &'a mut SqlBuilder {
    if let Some(value) = cond.level_id {
        builder.and_where_eq("developer.level_id", value);
    }
    if let Some(value) = cond.search_contains {
        build_where_search(builder, SEARCH_FIELDS, value);
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
                SortKey::Id => "developer.id",
                SortKey::Name => "developer.name",
                SortKey::Level => "level.name",
                SortKey::Gender => "developer.gender",
                SortKey::Birthdate => "developer.birthdate",
                SortKey::Hobby => "developer.hobby",
                SortKey::CreatedAt => "developer.created_at",
                SortKey::UpdatedAt => "developer.updated_at",
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
    if let Some(value) = updates.level_id {
        builder.set("level_id", value);
        count += 1;
    }
    if let Some(value) = updates.gender {
        builder.set("gender", quote(value));
        count += 1;
    }
    if let Some(value) = updates.birthdate.as_ref() {
        builder.set("birthdate", value.timestamp_millis());
        count += 1;
    }
    if let Some(value) = updates.hobby {
        builder.set("hobby", quote(value));
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
