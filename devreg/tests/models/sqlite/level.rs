use std::collections::HashMap;

use chrono::{SubsecRound, TimeDelta, Utc};
use laboratory::{SpecContext, expect};
use sql_builder::{SqlBuilder, quote};
use sqlx::SqlitePool;
use tokio::runtime::Runtime;

use devreg::models::Model;
use devreg::models::level::{
    ListOptions, ListQueryCond, NewLevel, QueryCond, SortCond, SortKey, Updates,
};

use super::{STATE, TestState};

const TABLE_NAME: &'static str = "level";
const FIELDS: &'static [&'static str] = &["id", "name", "created_at", "updated_at"];

pub fn after_each_fn(state: &mut HashMap<&'static str, TestState>) -> () {
    let state = state.get_mut(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let sql = SqlBuilder::delete_from(TABLE_NAME).sql().unwrap();
    let _ = runtime.block_on(async { sqlx::query(sql.as_str()).execute(conn).await });
    let sql = SqlBuilder::delete_from("developer").sql().unwrap();
    let _ = runtime.block_on(async { sqlx::query(sql.as_str()).execute(conn).await });
}

fn insert_level(
    runtime: &Runtime,
    conn: &SqlitePool,
    id: i64,
    name: &str,
    time_ms: i64,
) -> Result<(), String> {
    let sql = match SqlBuilder::insert_into(TABLE_NAME)
        .fields(FIELDS)
        .values(&vec![
            id.to_string(),
            quote(name),
            time_ms.to_string(),
            time_ms.to_string(),
        ])
        .sql()
    {
        Err(e) => return Err(format!("sql() error: {}", e.to_string())),
        Ok(sql) => sql,
    };
    match runtime.block_on(async { sqlx::query(&sql).execute(conn).await }) {
        Err(e) => Err(format!("insert_into() error: {}", e.to_string())),
        Ok(_) => Ok(()),
    }
}

fn insert_developer(
    runtime: &Runtime,
    conn: &SqlitePool,
    id: i64,
    name: &str,
    level_id: i64,
    time_ms: i64,
) -> Result<(), String> {
    let sql = match SqlBuilder::insert_into("developer")
        .fields(&["id", "name", "level_id", "created_at", "updated_at"])
        .values(&vec![
            id.to_string(),
            quote(name),
            level_id.to_string(),
            time_ms.to_string(),
            time_ms.to_string(),
        ])
        .sql()
    {
        Err(e) => return Err(format!("sql() error: {}", e.to_string())),
        Ok(sql) => sql,
    };
    match runtime.block_on(async { sqlx::query(&sql).execute(conn).await }) {
        Err(e) => Err(format!("insert_into() error: {}", e.to_string())),
        Ok(_) => Ok(()),
    }
}

/// Test table initialization.
pub fn init(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let model = state.sqlite.as_ref().unwrap().level();

    let result = runtime.block_on(async { model.init().await });
    expect(result.is_ok()).to_equal(true)
}

/// Test `get()`.
pub fn get(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3);
    insert_level(runtime, conn, 1, "Junior", now.timestamp_millis())?;

    let cond = QueryCond { id: Some(42) };
    match runtime.block_on(async { model.get(&cond).await }) {
        Err(e) => return Err(format!("model.get() error: {}", e)),
        Ok(level) => match level {
            None => (),
            Some(_) => return Err(format!("should not get not-exist one")),
        },
    };

    let cond = QueryCond { id: Some(1) };
    let level = match runtime.block_on(async { model.get(&cond).await }) {
        Err(e) => return Err(format!("model.get() error: {}", e)),
        Ok(level) => match level {
            None => return Err("should get one".to_string()),
            Some(level) => level,
        },
    };
    expect(level.id).to_equal(1)?;
    expect(level.name).to_equal("Junior".to_string())?;
    expect(level.developers_count).to_equal(None)?;
    expect(level.created_at).to_equal(now)?;
    expect(level.updated_at).to_equal(now)
}

/// Test `add()`.
pub fn add(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3);
    let level = NewLevel {
        name: "Senior",
        created_at: now,
        updated_at: now,
    };
    let id = match runtime.block_on(async { model.add(&level).await }) {
        Err(e) => return Err(format!("model.add() error: {}", e)),
        Ok(id) => id,
    };
    expect(id > 0).to_equal(true)?;

    let cond = QueryCond { id: Some(id) };
    let level = match runtime.block_on(async { model.get(&cond).await }) {
        Err(e) => return Err(format!("model.get() error: {}", e)),
        Ok(level) => match level {
            None => return Err("should get the added one".to_string()),
            Some(level) => level,
        },
    };
    expect(level.id).to_equal(id)?;
    expect(level.name).to_equal("Senior".to_string())?;
    expect(level.created_at).to_equal(now)?;
    expect(level.updated_at).to_equal(now)
}

/// Test `del()`.
pub fn del(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3);
    insert_level(runtime, conn, 1, "Junior", now.timestamp_millis())?;

    match runtime.block_on(async { model.del(1).await }) {
        Err(e) => return Err(format!("model.del() error: {}", e)),
        Ok(count) => expect(count).to_equal(1)?,
    }

    let cond = QueryCond { id: Some(1) };
    match runtime.block_on(async { model.get(&cond).await }) {
        Err(e) => Err(format!("model.get() error: {}", e)),
        Ok(level) => match level {
            None => Ok(()),
            Some(_) => Err("should delete one".to_string()),
        },
    }
}

/// Test `del()` twice.
pub fn del_twice(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3);
    insert_level(runtime, conn, 1, "Junior", now.timestamp_millis())?;

    if let Err(e) = runtime.block_on(async { model.del(1).await }) {
        return Err(format!("model.del() error: {}", e));
    }
    match runtime.block_on(async { model.del(1).await }) {
        Err(e) => Err(format!("model.del() twice error: {}", e)),
        Ok(count) => expect(count).to_equal(0),
    }
}

/// Test `update()`.
pub fn update(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3);
    insert_level(runtime, conn, 1, "Junior", now.timestamp_millis())?;

    let updated_at = now + TimeDelta::try_milliseconds(1).unwrap();
    let updates = Updates {
        name: Some("Middle"),
        updated_at: Some(updated_at),
    };
    match runtime.block_on(async { model.update(1, &updates).await }) {
        Err(e) => return Err(format!("model.update() error: {}", e)),
        Ok(count) => expect(count).to_equal(1)?,
    }

    let cond = QueryCond { id: Some(1) };
    let level = match runtime.block_on(async { model.get(&cond).await }) {
        Err(e) => return Err(format!("model.get() error: {}", e)),
        Ok(level) => match level {
            None => return Err("should get the updated one".to_string()),
            Some(level) => level,
        },
    };
    expect(level.name).to_equal("Middle".to_string())?;
    expect(level.created_at).to_equal(now)?;
    expect(level.updated_at).to_equal(updated_at)
}

/// Test `update()` with a non-exist ID.
pub fn update_not_exist(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let model = state.sqlite.as_ref().unwrap().level();

    let updates = Updates {
        name: Some("Middle"),
        ..Default::default()
    };
    match runtime.block_on(async { model.update(42, &updates).await }) {
        Err(e) => Err(format!("model.update() error: {}", e)),
        Ok(count) => expect(count).to_equal(0),
    }
}

/// Test `update()` with no field to update.
pub fn update_invalid(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3);
    insert_level(runtime, conn, 1, "Junior", now.timestamp_millis())?;

    let updates = Updates {
        ..Default::default()
    };
    match runtime.block_on(async { model.update(1, &updates).await }) {
        Err(e) => Err(format!("model.update() error: {}", e)),
        Ok(count) => expect(count).to_equal(0),
    }
}

/// Test `count()`.
pub fn count(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3).timestamp_millis();
    insert_level(runtime, conn, 1, "Junior", now)?;
    insert_level(runtime, conn, 2, "Senior", now)?;
    insert_level(runtime, conn, 3, "Staff", now)?;

    let cond = ListQueryCond {
        ..Default::default()
    };
    match runtime.block_on(async { model.count(&cond).await }) {
        Err(e) => return Err(format!("model.count() error: {}", e)),
        Ok(count) => expect(count).to_equal(3)?,
    }

    let cond = ListQueryCond {
        search_contains: Some("ior"),
    };
    match runtime.block_on(async { model.count(&cond).await }) {
        Err(e) => Err(format!("model.count() search error: {}", e)),
        Ok(count) => expect(count).to_equal(2),
    }
}

/// Test `list()`.
pub fn list(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3).timestamp_millis();
    insert_level(runtime, conn, 1, "Junior", now)?;
    insert_level(runtime, conn, 2, "Senior", now)?;

    let cond = ListQueryCond {
        ..Default::default()
    };
    let opts = ListOptions {
        cond: &cond,
        offset: None,
        limit: None,
        sort: None,
    };
    match runtime.block_on(async { model.list(&opts).await }) {
        Err(e) => return Err(format!("model.list() error: {}", e)),
        Ok((list, count)) => {
            expect(list.len()).to_equal(2)?;
            expect(count).to_equal(2)?;
        }
    }

    let cond = ListQueryCond {
        search_contains: Some("jun"),
    };
    let opts = ListOptions {
        cond: &cond,
        offset: None,
        limit: None,
        sort: None,
    };
    match runtime.block_on(async { model.list(&opts).await }) {
        Err(e) => Err(format!("model.list() search error: {}", e)),
        Ok((list, count)) => {
            expect(list.len()).to_equal(1)?;
            expect(count).to_equal(1)?;
            expect(list.get(0).unwrap().name.as_str()).to_equal("Junior")
        }
    }
}

/// Test `list()` with the developer count of each level.
pub fn list_developers_count(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3).timestamp_millis();
    insert_level(runtime, conn, 1, "Junior", now)?;
    insert_level(runtime, conn, 2, "Senior", now)?;
    insert_developer(runtime, conn, 1, "developer1", 1, now)?;
    insert_developer(runtime, conn, 2, "developer2", 1, now)?;

    let cond = ListQueryCond {
        ..Default::default()
    };
    let sort = vec![SortCond {
        key: SortKey::Id,
        asc: true,
    }];
    let opts = ListOptions {
        cond: &cond,
        offset: None,
        limit: None,
        sort: Some(sort.as_slice()),
    };
    match runtime.block_on(async { model.list(&opts).await }) {
        Err(e) => Err(format!("model.list() error: {}", e)),
        Ok((list, _)) => {
            expect(list.len()).to_equal(2)?;
            expect(list.get(0).unwrap().developers_count).to_equal(Some(2))?;
            expect(list.get(1).unwrap().developers_count).to_equal(Some(0))
        }
    }
}

/// Test `list()` with sort conditions.
pub fn list_sort(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3).timestamp_millis();
    insert_level(runtime, conn, 1, "Senior", now)?;
    insert_level(runtime, conn, 2, "Junior", now)?;

    let cond = ListQueryCond {
        ..Default::default()
    };
    let sort = vec![SortCond {
        key: SortKey::Name,
        asc: true,
    }];
    let opts = ListOptions {
        cond: &cond,
        offset: None,
        limit: None,
        sort: Some(sort.as_slice()),
    };
    match runtime.block_on(async { model.list(&opts).await }) {
        Err(e) => return Err(format!("model.list() asc error: {}", e)),
        Ok((list, _)) => {
            expect(list.len()).to_equal(2)?;
            expect(list.get(0).unwrap().name.as_str()).to_equal("Junior")?;
        }
    }

    let sort = vec![SortCond {
        key: SortKey::Name,
        asc: false,
    }];
    let opts = ListOptions {
        cond: &cond,
        offset: None,
        limit: None,
        sort: Some(sort.as_slice()),
    };
    match runtime.block_on(async { model.list(&opts).await }) {
        Err(e) => Err(format!("model.list() desc error: {}", e)),
        Ok((list, _)) => {
            expect(list.len()).to_equal(2)?;
            expect(list.get(0).unwrap().name.as_str()).to_equal("Senior")
        }
    }
}

/// Test `list()` with offset/limit.
pub fn list_offset_limit(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let conn = state.sqlite.as_ref().unwrap().get_connection();
    let model = state.sqlite.as_ref().unwrap().level();

    let now = Utc::now().trunc_subsecs(3).timestamp_millis();
    for i in 1..6 {
        insert_level(runtime, conn, i, format!("level_{}", i).as_str(), now)?;
    }

    let cond = ListQueryCond {
        ..Default::default()
    };
    let sort = vec![SortCond {
        key: SortKey::Id,
        asc: true,
    }];
    let opts = ListOptions {
        cond: &cond,
        offset: Some(2),
        limit: Some(2),
        sort: Some(sort.as_slice()),
    };
    match runtime.block_on(async { model.list(&opts).await }) {
        Err(e) => Err(format!("model.list() error: {}", e)),
        Ok((list, count)) => {
            expect(list.len()).to_equal(2)?;
            expect(count).to_equal(5)?;
            expect(list.get(0).unwrap().id).to_equal(3)?;
            expect(list.get(1).unwrap().id).to_equal(4)
        }
    }
}
