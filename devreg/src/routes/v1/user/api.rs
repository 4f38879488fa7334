use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
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
use crate::models::user::{
    ListOptions, ListQueryCond, NewUser, QueryCond, SortCond, SortKey, Updates, User,
};

/// `POST /{base}/api/v1/user`
pub async fn post_user(
    State(state): State<AppState>,
    Json(body): Json<request::PostUserBody>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "post_user";

    if body.data.name.len() == 0 {
        return Err(ErrResp::ErrParam(Some(
            "`name` must at least one character".to_string(),
        )));
    }
    let email = body.data.email.to_lowercase();
    if !strings::is_email(email.as_str()) {
        return Err(ErrResp::ErrParam(Some(
            "`email` must be a valid E-mail address".to_string(),
        )));
    }

    let cond = QueryCond {
        email: Some(email.as_str()),
        ..Default::default()
    };
    match state.model.user().get(&cond).await {
        Err(e) => {
            error!("[{}] get error: {}", FN_NAME, e);
            return Err(ErrResp::ErrDb(Some(e.to_string())));
        }
        Ok(user) => match user {
            None => (),
            Some(_) => {
                return Err(ErrResp::Custom(
                    ErrReq::EMAIL_EXIST.0,
                    ErrReq::EMAIL_EXIST.1,
                    None,
                ));
            }
        },
    }

    let now = Utc::now();
    let user = NewUser {
        name: body.data.name.as_str(),
        email: email.as_str(),
        created_at: now,
        updated_at: now,
    };
    let id = match state.model.user().add(&user).await {
        Err(e) => {
            error!("[{}] add error: {}", FN_NAME, e);
            return Err(ErrResp::ErrDb(Some(e.to_string())));
        }
        Ok(id) => id,
    };
    Ok(Json(response::PostUser {
        data: response::PostUserData { id },
    }))
}

/// `GET /{base}/api/v1/user/count`
pub async fn get_user_count(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_user_count";

    let cond = ListQueryCond {
        search_contains: get_search(&query),
    };
    match state.model.user().count(&cond).await {
        Err(e) => {
            error!("[{}] count error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(count) => Ok(Json(response::GetUserCount {
            data: response::GetCountData { count },
        })),
    }
}

/// `GET /{base}/api/v1/user/list`
pub async fn get_user_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_user_list";

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

    match state.model.user().list(&opts).await {
        Err(e) => {
            error!("[{}] list error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok((list, count)) => Ok(Json(response::GetUserList {
            data: user_list_transform(&list),
            count,
        })),
    }
}

/// `GET /{base}/api/v1/user/{userId}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(param): Path<request::UserIdPath>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "get_user";

    let cond = QueryCond {
        id: Some(param.user_id),
        ..Default::default()
    };
    match state.model.user().get(&cond).await {
        Err(e) => {
            error!("[{}] get error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(user) => match user {
            None => Err(ErrResp::ErrNotFound(None)),
            Some(user) => Ok(Json(response::GetUser {
                data: user_transform(&user),
            })),
        },
    }
}

/// `PUT /{base}/api/v1/user/{userId}`
pub async fn put_user(
    State(state): State<AppState>,
    Path(param): Path<request::UserIdPath>,
    Json(body): Json<request::PutUserBody>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "put_user";

    let email = match body.data.email.as_ref() {
        None => None,
        Some(email) => Some(email.to_lowercase()),
    };
    let updates = get_updates(&body.data, email.as_deref())?;

    if let Some(email) = email.as_deref() {
        let cond = QueryCond {
            email: Some(email),
            ..Default::default()
        };
        match state.model.user().get(&cond).await {
            Err(e) => {
                error!("[{}] get error: {}", FN_NAME, e);
                return Err(ErrResp::ErrDb(Some(e.to_string())));
            }
            Ok(user) => match user {
                None => (),
                Some(user) => {
                    if user.id != param.user_id {
                        return Err(ErrResp::Custom(
                            ErrReq::EMAIL_EXIST.0,
                            ErrReq::EMAIL_EXIST.1,
                            None,
                        ));
                    }
                }
            },
        }
    }

    match state.model.user().update(param.user_id, &updates).await {
        Err(e) => {
            error!("[{}] update error: {}", FN_NAME, e);
            Err(ErrResp::ErrDb(Some(e.to_string())))
        }
        Ok(0) => Err(ErrResp::ErrNotFound(None)),
        Ok(_) => Ok(StatusCode::NO_CONTENT),
    }
}

/// `DELETE /{base}/api/v1/user/{userId}`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(param): Path<request::UserIdPath>,
) -> impl IntoResponse {
    const FN_NAME: &'static str = "delete_user";

    match state.model.user().del(param.user_id).await {
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
            "email" => SortKey::Email,
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
    body: &'a request::PutUserData,
    email: Option<&'a str>,
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
    if let Some(email) = email {
        if !strings::is_email(email) {
            return Err(ErrResp::ErrParam(Some(
                "`email` must be a valid E-mail address".to_string(),
            )));
        }
        updates.email = Some(email);
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

fn user_list_transform(list: &Vec<User>) -> Vec<response::GetUserData> {
    let mut ret = vec![];
    for user in list.iter() {
        ret.push(user_transform(&user));
    }
    ret
}

fn user_transform(user: &User) -> response::GetUserData {
    response::GetUserData {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: time_str(&user.created_at),
        updated_at: time_str(&user.updated_at),
    }
}
