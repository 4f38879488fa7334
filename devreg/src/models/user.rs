//! Traits, enumerations and structs for users.

use std::error::Error as StdError;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The item content.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The content for adding an item. The ID is generated by the model.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The sort keys for the list operation.
pub enum SortKey {
    Id,
    Name,
    Email,
    CreatedAt,
    UpdatedAt,
}

/// The sort condition for the list operation.
pub struct SortCond {
    pub key: SortKey,
    pub asc: bool,
}

/// The list operation options.
pub struct ListOptions<'a> {
    /// The query conditions.
    pub cond: &'a ListQueryCond<'a>,
    /// The data offset.
    pub offset: Option<u64>,
    /// The maximum number to query.
    pub limit: Option<u64>,
    /// The sort conditions.
    pub sort: Option<&'a [SortCond]>,
}

/// The query condition to get item(s).
#[derive(Default)]
pub struct QueryCond<'a> {
    pub id: Option<i64>,
    pub email: Option<&'a str>,
}

/// The query condition for the list operation.
#[derive(Default)]
pub struct ListQueryCond<'a> {
    /// To get users which name or E-mail contains the specified word.
    pub search_contains: Option<&'a str>,
}

/// The update fields by using [`Some`]s.
#[derive(Default)]
pub struct Updates<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Model operations.
#[async_trait]
pub trait UserModel: Sync {
    /// To create and initialize the table/collection.
    async fn init(&self) -> Result<(), Box<dyn StdError>>;

    /// To get item count for the query condition.
    async fn count(&self, cond: &ListQueryCond) -> Result<u64, Box<dyn StdError>>;

    /// To get the item list and the total item count for the query condition. The count ignores
    /// `offset` and `limit`.
    async fn list(&self, opts: &ListOptions) -> Result<(Vec<User>, u64), Box<dyn StdError>>;

    /// To get an item.
    async fn get(&self, cond: &QueryCond) -> Result<Option<User>, Box<dyn StdError>>;

    /// To add an item. Returns the generated ID.
    async fn add(&self, user: &NewUser) -> Result<i64, Box<dyn StdError>>;

    /// To delete an item. Returns the number of deleted items.
    async fn del(&self, id: i64) -> Result<u64, Box<dyn StdError>>;

    /// To update an item. Returns the number of updated items.
    async fn update(&self, id: i64, updates: &Updates) -> Result<u64, Box<dyn StdError>>;
}
