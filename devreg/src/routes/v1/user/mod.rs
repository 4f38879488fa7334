use axum::{Router, routing};

use super::super::State;

mod api;
mod request;
mod response;

pub fn new_service(scope_path: &str, state: &State) -> Router {
    Router::new().nest(
        scope_path,
        Router::new()
            .route("/", routing::post(api::post_user))
            .route("/count", routing::get(api::get_user_count))
            .route("/list", routing::get(api::get_user_list))
            .route(
                "/{user_id}",
                routing::get(api::get_user)
                    .put(api::put_user)
                    .delete(api::delete_user),
            )
            .with_state(state.clone()),
    )
}
