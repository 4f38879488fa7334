use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use log::error;

use devreg_corelib::{
    err::ErrResp,
    http::{Json, Path, Query},
    strings::time_str,
};

use super::{
    super::{
        super::{ErrReq, State as AppState},
        ListQuery, get_search, get_skip, get_sort_pairs, get_take,
    },
    request, response,
};
use crate::models::{
    developer,
    level::{Level, ListOptions, ListQueryCond, NewLevel, QueryCond, SortCond, SortKey, Updates},
};

/// `POST /{base}/api/v1/level`
pub async fn post_level(
    State(state): State<AppState>,
    Json(body): Json<request::PostLevelBody>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "post_level";

    if body.data.name.len() == 0 {
        return Err(ErrResp::ErrParam(Some(
            "`name` must at least one character".to_string(),
        )));
    }

    let now = Utc::now();
    let level = NewLevel {
        name: body.data.name.as_str(),
        created_at: now,
        updated_at: now,
    };
    let id = match state.model.level().add(&level).await {
        Err(e) => {
            error!("[{}] add error: {}", FN_NAME, e);
            return Err(ErrResp::ErrDb(Some(e.to_string())));
        }
        Ok(id) => id,
    };
    Ok(Json(response::PostLevel {
        data: response::PostLevelData { id },
    }))
}

/// `GET /{base}/api/v1/level/count`
pub async fn get_level_count(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_level_count";

    let cond = ListQueryCond {
        search_contains: get_search(&query),
    };
    match state.model.level().count(&cond).await {
        Err(e) => {
            error!("[{}] count error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(count) => Ok(Json(response::GetLevelCount {
            data: response::GetCountData { count },
        })),
    }
}

/// `GET /{base}/api/v1/level/list`
pub async fn get_level_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_level_list";

    let cond = ListQueryCond {
        search_contains: get_search(&query),
    };
    let sort_cond = get_sort_cond(&query.sort)?;
    let opts = ListOptions {
        cond: &cond,
        offset: Some(get_skip(&query)),
        limit: Some(get_take(&query)),
        sort: match sort_cond.len() {
            0 => None,
            _ => Some(sort_cond.as_slice()),
        },
    };

    match state.model.level().list(&opts).await {
        Err(e) => {
            error!("[{}] list error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok((list, count)) => Ok(Json(response::GetLevelList {
            data: level_list_transform(&list),
            count,
        })),
    }
}

/// `GET /{base}/api/v1/level/select`
///
/// All levels as `id`/`name` pairs ordered by name, for dropdown lists.
pub async fn get_level_select(State(state): State<AppState>) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_level_select";

    let cond = ListQueryCond {
        ..Default::default()
    };
    let sort_cond = vec![SortCond {
        key: SortKey::Name,
        asc: true,
    }];
    let opts = ListOptions {
        cond: &cond,
        offset: None,
        limit: None,
        sort: Some(sort_cond.as_slice()),
    };

    match state.model.level().list(&opts).await {
        Err(e) => {
            error!("[{}] list error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok((list, _)) => {
            let mut data = vec![];
            for level in list.iter() {
                data.push(response::GetLevelSelectData {
                    id: level.id,
                    name: level.name.clone(),
                });
            }
            Ok(Json(response::GetLevelSelect { data }))
        }
    }
}

/// `GET /{base}/api/v1/level/{levelId}`
pub async fn get_level(
    State(state): State<AppState>,
    Path(param): Path<request::LevelIdPath>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_level";

    let cond = QueryCond {
        id: Some(param.level_id),
    };
    match state.model.level().get(&cond).await {
        Err(e) => {
            error!("[{}] get error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(level) => match level {
            None => Err(ErrResp::ErrNotFound(None)),
            Some(level) => Ok(Json(response::GetLevel {
                data: level_transform(&level),
            })),
        },
    }
}

/// `PUT /{base}/api/v1/level/{levelId}`
pub async fn put_level(
    State(state): State<AppState>,
    Path(param): Path<request::LevelIdPath>,
    Json(body): Json<request::PutLevelBody>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "put_level";

    let updates = get_updates(&body.data)?;

    match state.model.level().update(param.level_id, &updates).await {
        Err(e) => {
            error!("[{}] update error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(0) => Err(ErrResp::ErrNotFound(None)),
        Ok(_) => Ok(StatusCode::NO_CONTENT),
    }
}

/// `DELETE /{base}/api/v1/level/{levelId}`
///
/// Levels that still have developers cannot be deleted.
pub async fn delete_level(
    State(state): State<AppState>,
    Path(param): Path<request::LevelIdPath>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "delete_level";

    let cond = developer::ListQueryCond {
        level_id: Some(param.level_id),
        ..Default::default()
    };
    match state.model.developer().count(&cond).await {
        Err(e) => {
            error!("[{}] count error: {}", FN_NAME, e);
            return Err(ErrResp::ErrDb(Some(e.to_string())));
        }
        Ok(0) => (),
        Ok(_) => {
            return Err(ErrResp::Custom(
                ErrReq::LEVEL_IN_USE.0,
                ErrReq::LEVEL_IN_USE.1,
                None,
            ));
        }
    }

    match state.model.level().del(param.level_id).await {
        Err(e) => {
            error!("[{}] del error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(0) => Err(ErrResp::ErrNotFound(None)),
        Ok(_) => Ok(StatusCode::NO_CONTENT),
    }
}

fn get_sort_cond(sort_args: &Option<String>) -> Result<Vec<SortCond>, ErrResp> {
    let args = match sort_args.as_ref() {
        None => return Ok(vec![]),
        Some(args) => args,
    };
    let mut sort_cond = vec![];
    for (field, asc) in get_sort_pairs(args.as_str())? {
        let key = match field {
            "id" => SortKey::Id,
            "name" => SortKey::Name,
            "created_at" => SortKey::CreatedAt,
            "updated_at" => SortKey::UpdatedAt,
            _ => {
                return Err(ErrResp::ErrParam(Some(format!(
                    "invalid sort key {}",
                    field
                ))));
            }
        };
        sort_cond.push(SortCond { key, asc });
    }
    Ok(sort_cond)
}

fn get_updates<'a>(body: &'a request::PutLevelData) -> Result<Updates<'a>, ErrResp> {
    let mut updates = Updates {
        ..Default::default()
    };
    let mut count = 0;
    if let Some(name) = body.name.as_ref() {
        if name.len() == 0 {
            return Err(ErrResp::ErrParam(Some(
                "`name` must at least one character".to_string(),
            )));
        }
        updates.name = Some(name.as_str());
        count += 1;
    }
    if count == 0 {
        return Err(ErrResp::ErrParam(Some(
            "at least one parameter".to_string(),
        )));
    }
    updates.updated_at = Some(Utc::now());
    Ok(updates)
}

fn level_list_transform(list: &Vec<Level>) -> Vec<response::GetLevelData> {
    let mut ret = vec![];
    for level in list.iter() {
        ret.push(level_transform(&level));
    }
    ret
}

fn level_transform(level: &Level) -> response::GetLevelData {
    response::GetLevelData {
        id: level.id,
        name: level.name.clone(),
        developers_count: level.developers_count,
        created_at: time_str(&level.created_at),
        updated_at: time_str(&level.updated_at),
    }
}
