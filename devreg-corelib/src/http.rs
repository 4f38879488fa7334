//! axum extractors that replace rejections with [`ErrResp`] so every endpoint
//! reports parameter errors with the same JSON body.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::err::ErrResp;

/// JSON body extractor/response. Rejections become [`ErrResp::ErrParam`].
pub struct Json<T>(pub T);

/// Path parameter extractor. Rejections become [`ErrResp::ErrParam`].
pub struct Path<T>(pub T);

/// Query string extractor. Rejections become [`ErrResp::ErrParam`].
pub struct Query<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ErrResp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Json::<T>::from_request(req, state).await {
            Err(e) => Err(ErrResp::ErrParam(Some(e.body_text()))),
            Ok(value) => Ok(Json(value.0)),
        }
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ErrResp;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Err(e) => Err(ErrResp::ErrParam(Some(e.body_text()))),
            Ok(value) => Ok(Path(value.0)),
        }
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ErrResp;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Err(e) => Err(ErrResp::ErrParam(Some(e.body_text()))),
            Ok(value) => Ok(Query(value.0)),
        }
    }
}
