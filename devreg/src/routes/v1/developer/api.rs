use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use log::error;

use devreg_corelib::{
    err::ErrResp,
    http::{Json, Path, Query},
    strings::{self, time_str},
};

use super::{
    super::{
        super::{ErrReq, State as AppState},
        ListQuery, get_search, get_skip, get_sort_pairs, get_take,
    },
    request, response,
};
use crate::models::{
    developer::{
        Developer, ListOptions, ListQueryCond, NewDeveloper, QueryCond, SortCond, SortKey, Updates,
    },
    level,
};

/// `POST /{base}/api/v1/developer`
pub async fn post_developer(
    State(state): State<AppState>,
    Json(body): Json<request::PostDeveloperBody>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "post_developer";

    if body.data.name.len() == 0 {
        return Err(ErrResp::ErrParam(Some(
            "`name` must at least one character".to_string(),
        )));
    }
    let birthdate = match body.data.birthdate.as_ref() {
        None => None,
        Some(birthdate) => Some(get_birthdate(birthdate.as_str())?),
    };
    check_level(&FN_NAME, &state, body.data.level_id).await?;

    let now = Utc::now();
    let developer = NewDeveloper {
        name: body.data.name.as_str(),
        level_id: body.data.level_id,
        gender: body.data.gender.as_deref(),
        birthdate,
        hobby: body.data.hobby.as_deref(),
        created_at: now,
        updated_at: now,
    };
    let id = match state.model.developer().add(&developer).await {
        Err(e) => {
            error!("[{}] add error: {}", FN_NAME, e);
            return Err(ErrResp::ErrDb(Some(e.to_string())));
        }
        Ok(id) => id,
    };
    Ok(Json(response::PostDeveloper {
        data: response::PostDeveloperData { id },
    }))
}

/// `GET /{base}/api/v1/developer/count`
pub async fn get_developer_count(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_developer_count";

    let cond = ListQueryCond {
        search_contains: get_search(&query),
        ..Default::default()
    };
    match state.model.developer().count(&cond).await {
        Err(e) => {
            error!("[{}] count error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(count) => Ok(Json(response::GetDeveloperCount {
            data: response::GetCountData { count },
        })),
    }
}

/// `GET /{base}/api/v1/developer/list`
pub async fn get_developer_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_developer_list";

    let cond = ListQueryCond {
        search_contains: get_search(&query),
        ..Default::default()
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

    match state.model.developer().list(&opts).await {
        Err(e) => {
            error!("[{}] list error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok((list, count)) => Ok(Json(response::GetDeveloperList {
            data: developer_list_transform(&list),
            count,
        })),
    }
}

/// `GET /{base}/api/v1/developer/{developerId}`
pub async fn get_developer(
    State(state): State<AppState>,
    Path(param): Path<request::DeveloperIdPath>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_developer";

    let cond = QueryCond {
        id: Some(param.developer_id),
    };
    match state.model.developer().get(&cond).await {
        Err(e) => {
            error!("[{}] get error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(developer) => match developer {
            None => Err(ErrResp::ErrNotFound(None)),
            Some(developer) => Ok(Json(response::GetDeveloper {
                data: developer_transform(&developer),
            })),
        },
    }
}

/// `PUT /{base}/api/v1/developer/{developerId}`
pub async fn put_developer(
    State(state): State<AppState>,
    Path(param): Path<request::DeveloperIdPath>,
    Json(body): Json<request::PutDeveloperBody>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "put_developer";

    let birthdate = match body.data.birthdate.as_ref() {
        None => None,
        Some(birthdate) => Some(get_birthdate(birthdate.as_str())?),
    };
    let updates = get_updates(&body.data, birthdate)?;
    if let Some(level_id) = body.data.level_id {
        check_level(&FN_NAME, &state, level_id).await?;
    }

    match state
        .model
        .developer()
        .update(param.developer_id, &updates)
        .await
    {
        Err(e) => {
            error!("[{}] update error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(0) => Err(ErrResp::ErrNotFound(None)),
        Ok(_) => Ok(StatusCode::NO_CONTENT),
    }
}

/// `DELETE /{base}/api/v1/developer/{developerId}`
pub async fn delete_developer(
    State(state): State<AppState>,
    Path(param): Path<request::DeveloperIdPath>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "delete_developer";

    match state.model.developer().del(param.developer_id).await {
        Err(e) => {
            error!("[{}] del error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(0) => Err(ErrResp::ErrNotFound(None)),
        Ok(_) => Ok(StatusCode::NO_CONTENT),
    }
}

/// Rejects with [`ErrReq::LEVEL_NOT_EXIST`] when the level is not in the database.
async fn check_level(fn_name: &str, state: &AppState, level_id: i64) -> Result<(), ErrResp> {
    let cond = level::QueryCond {
        id: Some(level_id),
    };
    match state.model.level().get(&cond).await {
        Err(e) => {
            error!("[{}] get level error: {}", fn_name, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(level) => match level {
            None => Err(ErrResp::Custom(
                ErrReq::LEVEL_NOT_EXIST.0,
                ErrReq::LEVEL_NOT_EXIST.1,
                None,
            )),
            Some(_) => Ok(()),
        },
    }
}

fn get_birthdate(birthdate: &str) -> Result<DateTime<Utc>, ErrResp> {
    match strings::parse_date_str(birthdate) {
        Err(_) => Err(ErrResp::ErrParam(Some(
            "`birthdate` must be DD/MM/YYYY".to_string(),
        ))),
        Ok(birthdate) => Ok(birthdate),
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
            "level" => SortKey::Level,
            "gender" => SortKey::Gender,
            "birthdate" => SortKey::Birthdate,
            "hobby" => SortKey::Hobby,
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

fn get_updates<'a>(
    body: &'a request::PutDeveloperData,
    birthdate: Option<DateTime<Utc>>,
) -> Result<Updates<'a>, ErrResp> {
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
    if let Some(level_id) = body.level_id {
        updates.level_id = Some(level_id);
        count += 1;
    }
    if let Some(gender) = body.gender.as_ref() {
        updates.gender = Some(gender.as_str());
        count += 1;
    }
    if let Some(birthdate) = birthdate {
        updates.birthdate = Some(birthdate);
        count += 1;
    }
    if let Some(hobby) = body.hobby.as_ref() {
        updates.hobby = Some(hobby.as_str());
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

fn developer_list_transform(list: &Vec<Developer>) -> Vec<response::GetDeveloperData> {
    let mut ret = vec![];
    for developer in list.iter() {
        ret.push(developer_transform(&developer));
    }
    ret
}

fn developer_transform(developer: &Developer) -> response::GetDeveloperData {
    response::GetDeveloperData {
        id: developer.id,
        name: developer.name.clone(),
        level_id: developer.level_id,
        level: developer.level_name.clone(),
        gender: developer.gender.clone(),
        birthdate: match developer.birthdate.as_ref() {
            None => None,
            Some(birthdate) => Some(strings::date_str(birthdate)),
        },
        age: match developer.birthdate.as_ref() {
            None => None,
            Some(birthdate) => strings::age(birthdate),
        },
        hobby: developer.hobby.clone(),
        created_at: time_str(&developer.created_at),
        updated_at: time_str(&developer.updated_at),
    }
}
