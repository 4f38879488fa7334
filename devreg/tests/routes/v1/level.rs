use axum::http::StatusCode;
use chrono::Utc;
use laboratory::{SpecContext, expect};
use serde_json::{Value, json};
use tokio::runtime::Runtime;

use devreg::{
    models::{
        developer::NewDeveloper,
        level::{NewLevel, QueryCond},
    },
    routes,
};
use devreg_corelib::err;

use super::{
    STATE, TestState,
    libs::{ApiError, new_server},
};

fn add_level(runtime: &Runtime, state: &routes::State, name: &str) -> Result<i64, String> {
    let now = Utc::now();
    let level = NewLevel {
        name,
        created_at: now,
        updated_at: now,
    };
    match runtime.block_on(async { state.model.level().add(&level).await }) {
        Err(e) => Err(format!("add level error: {}", e)),
        Ok(id) => Ok(id),
    }
}

fn add_developer(
    runtime: &Runtime,
    state: &routes::State,
    name: &str,
    level_id: i64,
) -> Result<i64, String> {
    let now = Utc::now();
    let developer = NewDeveloper {
        name,
        level_id,
        gender: None,
        birthdate: None,
        hobby: None,
        created_at: now,
        updated_at: now,
    };
    match runtime.block_on(async { state.model.developer().add(&developer).await }) {
        Err(e) => Err(format!("add developer error: {}", e)),
        Ok(id) => Ok(id),
    }
}

pub fn post(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;
    let body = json!({"data": {"name": "Junior"}});
    let req = server.post("/devreg/api/v1/level").json(&body);
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::OK)?;
    let body: Value = resp.json();
    let level_id = match body["data"]["id"].as_i64() {
        None => return Err("no data.id in response".to_string()),
        Some(id) => id,
    };
    expect(level_id > 0).to_equal(true)?;

    let cond = QueryCond { id: Some(level_id) };
    let level = match runtime.block_on(async { routes_state.model.level().get(&cond).await }) {
        Err(e) => return Err(format!("get level error: {}", e)),
        Ok(level) => match level {
            None => return Err("should add one".to_string()),
            Some(level) => level,
        },
    };
    expect(level.name).to_equal("Junior".to_string())
}

pub fn post_invalid_param(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;

    let req = server.post("/devreg/api/v1/level");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::BAD_REQUEST)?;

    for body in [json!({"data": {}}), json!({"data": {"name": ""}})] {
        let req = server.post("/devreg/api/v1/level").json(&body);
        let resp = runtime.block_on(async { req.await });
        expect(resp.status_code()).to_equal(StatusCode::BAD_REQUEST)?;
        let body: ApiError = resp.json();
        expect(body.code.as_str()).to_equal(err::E_PARAM)?;
    }
    Ok(())
}

pub fn get_count(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    add_level(runtime, routes_state, "Junior")?;
    add_level(runtime, routes_state, "Senior")?;
    add_level(runtime, routes_state, "Staff")?;

    let server = new_server(routes_state)?;
    let req = server.get("/devreg/api/v1/level/count");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::OK)?;
    let body: Value = resp.json();
    expect(body["data"]["count"].as_u64()).to_equal(Some(3))?;

    let req = server
        .get("/devreg/api/v1/level/count")
        .add_query_param("search", "ior");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::OK)?;
    let body: Value = resp.json();
    expect(body["data"]["count"].as_u64()).to_equal(Some(2))
}

pub fn get_list(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let junior_id = add_level(runtime, routes_state, "Junior")?;
    add_level(runtime, routes_state, "Senior")?;
    add_developer(runtime, routes_state, "Developer One", junior_id)?;
    add_developer(runtime, routes_state, "Developer Two", junior_id)?;

    let server = new_server(routes_state)?;
    let req = server
        .get("/devreg/api/v1/level/list")
        .add_query_param("sort", "name asc");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::OK)?;
    let body: Value = resp.json();
    let data = body["data"].as_array().unwrap();
    expect(data.len()).to_equal(2)?;
    expect(body["count"].as_u64()).to_equal(Some(2))?;
    expect(data[0]["name"].as_str()).to_equal(Some("Junior"))?;
    expect(data[0]["developersCount"].as_u64()).to_equal(Some(2))?;
    expect(data[1]["name"].as_str()).to_equal(Some("Senior"))?;
    expect(data[1]["developersCount"].as_u64()).to_equal(Some(0))
}

pub fn get_select(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let senior_id = add_level(runtime, routes_state, "Senior")?;
    let junior_id = add_level(runtime, routes_state, "Junior")?;

    let server = new_server(routes_state)?;
    let req = server.get("/devreg/api/v1/level/select");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::OK)?;
    let body: Value = resp.json();
    let data = body["data"].as_array().unwrap();
    // Ordered by name.
    expect(data.len()).to_equal(2)?;
    expect(data[0]["id"].as_i64()).to_equal(Some(junior_id))?;
    expect(data[0]["name"].as_str()).to_equal(Some("Junior"))?;
    expect(data[1]["id"].as_i64()).to_equal(Some(senior_id))?;
    expect(data[1]["name"].as_str()).to_equal(Some("Senior"))?;
    // Only ID/name pairs.
    expect(data[0]["developersCount"].is_null()).to_equal(true)?;
    expect(data[0]["createdAt"].is_null()).to_equal(true)
}

pub fn get(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let level_id = add_level(runtime, routes_state, "Junior")?;

    let server = new_server(routes_state)?;
    let req = server.get(format!("/devreg/api/v1/level/{}", level_id).as_str());
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::OK)?;
    let body: Value = resp.json();
    expect(body["data"]["id"].as_i64()).to_equal(Some(level_id))?;
    expect(body["data"]["name"].as_str()).to_equal(Some("Junior"))?;
    // The developer count is only in the list API.
    expect(body["data"].get("developersCount").is_none()).to_equal(true)?;
    expect(body["data"]["createdAt"].is_string()).to_equal(true)?;
    expect(body["data"]["updatedAt"].is_string()).to_equal(true)
}

pub fn get_wrong_id(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;
    let req = server.get("/devreg/api/v1/level/42");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::NOT_FOUND)?;
    let body: ApiError = resp.json();
    expect(body.code.as_str()).to_equal(err::E_NOT_FOUND)
}

pub fn put(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let level_id = add_level(runtime, routes_state, "Junior")?;

    let server = new_server(routes_state)?;
    let body = json!({"data": {"name": "Middle"}});
    let req = server
        .put(format!("/devreg/api/v1/level/{}", level_id).as_str())
        .json(&body);
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::NO_CONTENT)?;

    let cond = QueryCond { id: Some(level_id) };
    let level = match runtime.block_on(async { routes_state.model.level().get(&cond).await }) {
        Err(e) => return Err(format!("get level error: {}", e)),
        Ok(level) => match level {
            None => return Err("should get the updated one".to_string()),
            Some(level) => level,
        },
    };
    expect(level.name).to_equal("Middle".to_string())
}

pub fn put_wrong_id(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;
    let body = json!({"data": {"name": "Middle"}});
    let req = server.put("/devreg/api/v1/level/42").json(&body);
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::NOT_FOUND)?;
    let body: ApiError = resp.json();
    expect(body.code.as_str()).to_equal(err::E_NOT_FOUND)
}

pub fn put_invalid_param(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let level_id = add_level(runtime, routes_state, "Junior")?;

    let server = new_server(routes_state)?;
    for body in [json!({"data": {}}), json!({"data": {"name": ""}})] {
        let req = server
            .put(format!("/devreg/api/v1/level/{}", level_id).as_str())
            .json(&body);
        let resp = runtime.block_on(async { req.await });
        expect(resp.status_code()).to_equal(StatusCode::BAD_REQUEST)?;
        let body: ApiError = resp.json();
        expect(body.code.as_str()).to_equal(err::E_PARAM)?;
    }
    Ok(())
}

pub fn delete(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let level_id = add_level(runtime, routes_state, "Junior")?;

    let server = new_server(routes_state)?;
    let req = server.delete(format!("/devreg/api/v1/level/{}", level_id).as_str());
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::NO_CONTENT)?;

    let cond = QueryCond { id: Some(level_id) };
    match runtime.block_on(async { routes_state.model.level().get(&cond).await }) {
        Err(e) => Err(format!("get level error: {}", e)),
        Ok(level) => match level {
            None => Ok(()),
            Some(_) => Err("should delete one".to_string()),
        },
    }
}

pub fn delete_in_use(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let level_id = add_level(runtime, routes_state, "Junior")?;
    let developer_id = add_developer(runtime, routes_state, "Developer One", level_id)?;

    let server = new_server(routes_state)?;
    let req = server.delete(format!("/devreg/api/v1/level/{}", level_id).as_str());
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::BAD_REQUEST)?;
    let body: ApiError = resp.json();
    expect(body.code.as_str()).to_equal("err_devreg_level_in_use")?;

    // Deletable again when no developer references it.
    if let Err(e) = runtime.block_on(async { routes_state.model.developer().del(developer_id).await })
    {
        return Err(format!("del developer error: {}", e));
    }
    let req = server.delete(format!("/devreg/api/v1/level/{}", level_id).as_str());
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::NO_CONTENT)
}

pub fn delete_wrong_id(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;
    let req = server.delete("/devreg/api/v1/level/42");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::NOT_FOUND)?;
    let body: ApiError = resp.json();
    expect(body.code.as_str()).to_equal(err::E_NOT_FOUND)
}
