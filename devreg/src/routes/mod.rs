use std::{error::Error as StdError, sync::Arc};

use axum::{Router, response::IntoResponse};
use serde::{Deserialize, Serialize};

use devreg_corelib::http::{Json, Query};

use crate::{
    libs::config::{self, Config},
    models::{self, ConnOptions, Model, SqliteOptions},
};

mod v1;

/// The resources used by this service.
#[derive(Clone)]
pub struct State {
    /// The scope root path for the service.
    ///
    /// For example `/devreg`, the APIs are
    /// - `http://host:port/devreg/api/v1/user/xxx`
    /// - `http://host:port/devreg/api/v1/level/xxx`
    /// - `http://host:port/devreg/api/v1/developer/xxx`
    pub scope_path: &'static str,
    /// The database model.
    pub model: Arc<dyn Model>,
}

/// The devreg module specific error codes in addition to standard `ErrResp`.
pub struct ErrReq;

/// Query parameters for `GET /version`
#[derive(Deserialize)]
pub struct GetVersionQuery {
    q: Option<String>,
}

#[derive(Serialize)]
struct GetVersionRes<'a> {
    data: GetVersionResData<'a>,
}

#[derive(Serialize)]
struct GetVersionResData<'a> {
    name: &'a str,
    version: &'a str,
}

const SERV_NAME: &'static str = env!("CARGO_PKG_NAME");
const SERV_VER: &'static str = env!("CARGO_PKG_VERSION");

impl ErrReq {
    pub const EMAIL_EXIST: (u16, &'static str) = (400, "err_devreg_email_exist");
    pub const LEVEL_IN_USE: (u16, &'static str) = (400, "err_devreg_level_in_use");
    pub const LEVEL_NOT_EXIST: (u16, &'static str) = (400, "err_devreg_level_not_exist");
}

/// To create resources for the service.
pub async fn new_state(
    scope_path: &'static str,
    conf: &Config,
) -> Result<State, Box<dyn StdError>> {
    let conf = config::apply_default(conf);
    let db_conf = conf.db.as_ref().unwrap().sqlite.as_ref().unwrap();
    let db_opts = ConnOptions::Sqlite(SqliteOptions {
        path: db_conf.path.as_ref().unwrap().to_string(),
    });
    let model = models::new(&db_opts).await?;
    Ok(State {
        scope_path: match scope_path.len() {
            0 => "/",
            _ => scope_path,
        },
        model,
    })
}

/// To register service URIs in the specified root path.
pub fn new_service(state: &State) -> Router {
    Router::new().nest(
        &state.scope_path,
        Router::new()
            .merge(v1::user::new_service("/api/v1/user", state))
            .merge(v1::level::new_service("/api/v1/level", state))
            .merge(v1::developer::new_service("/api/v1/developer", state)),
    )
}

pub async fn get_version(Query(query): Query<GetVersionQuery>) -> impl IntoResponse {
    if let Some(q) = query.q.as_ref() {
        match q.as_str() {
            "name" => return SERV_NAME.into_response(),
            "version" => return SERV_VER.into_response(),
            _ => (),
        }
    }

    Json(GetVersionRes {
        data: GetVersionResData {
            name: SERV_NAME,
            version: SERV_VER,
        },
    })
    .into_response()
}
