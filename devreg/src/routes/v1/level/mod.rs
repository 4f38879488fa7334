use axum::{Router, routing};

use super::super::State;

mod api;
mod request;
mod response;

pub fn new_service(scope_path: &str, state: &State) -> Router {
    Router::new().nest(
        scope_path,
        Router::new()
            .route("/", routing::post(api::post_level))
            .route("/count", routing::get(api::get_level_count))
            .route("/list", routing::get(api::get_level_list))
            .route("/select", routing::get(api::get_level_select))
            .route(
                "/{level_id}",
                routing::get(api::get_level)
                    .put(api::put_level)
                    .delete(api::delete_level),
            )
            .with_state(state.clone()),
    )
}
