use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::permit::{
    check_permit_validity, revoke_permit, show_permit, verify_permit,
};

pub fn build_permit_routers() -> Router<AppRegistry> {
    let permit_routers = Router::new()
        .route("/verify", post(verify_permit))
        .route("/:permit_id", get(show_permit))
        .route("/:permit_id/validity", get(check_permit_validity))
        .route("/:permit_id/revoke", put(revoke_permit));

    Router::new().nest("/permits", permit_routers)
}
