use std::sync::Arc;

use crate::config::Config;
use crate::submission::Submissions;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub submissions: Submissions,
    pub config: Config,
}
