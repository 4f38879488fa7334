use axum::{Router, routing};

use super::super::State;

mod api;
mod request;
mod response;

pub fn new_service(scope_path: &str, state: &State) -> Router {
    Router::new().nest(
        scope_path,
        Router::new()
            .route("/", routing::post(api::post_developer))
            .route("/count", routing::get(api::get_developer_count))
            .route("/list", routing::get(api::get_developer_list))
            .route(
                "/{developer_id}",
                routing::get(api::get_developer)
                    .put(api::put_developer)
                    .delete(api::delete_developer),
            )
            .with_state(state.clone()),
    )
}
