pub mod submissions;

use axum::Router;
use axum::routing::get;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/submissions", get(submissions::list))
        .route("/api/submissions/search", get(submissions::search))
        // One segment, two meanings: a form type on POST, a submission id on GET.
        .route(
            "/api/submissions/{key}",
            get(submissions::get).post(submissions::create),
        )
}
