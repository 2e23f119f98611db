// Configuration module
// Runtime settings from the environment and the static model context

pub mod constants;
mod context;
mod settings;

pub use context::{Site, StaticContext, Team};
pub use settings::{
    Settings, API_KEY_VAR, CONTEXT_PATH_VAR, MODEL_VAR, PORT_VAR, REFRESH_VAR, RESULTS_URL_VAR,
    ROSTER_URL_VAR,
};
