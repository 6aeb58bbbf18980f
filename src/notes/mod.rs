mod handlers;
mod model;
mod routes;

pub use model::*;

use aide::axum::ApiRouter;

use crate::state::AppState;

pub fn router(state: AppState) -> ApiRouter {
    ApiRouter::new().merge(routes::router(state.clone()))
}
