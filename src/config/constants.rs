// Project-wide constants
//
// Centralised here so ports, upstream URLs and user-facing strings have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default HTTP port (kept apart from the frontend dev server).
pub const DEFAULT_PORT: u16 = 5001;

/// Default bind host. The relay sits behind a browser frontend on another origin.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default generative model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Gemini REST endpoint root.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Team roster page (Liquipedia).
pub const DEFAULT_ROSTER_URL: &str = "https://liquipedia.net/counterstrike/FURIA";

/// Team results page (Liquipedia).
pub const DEFAULT_RESULTS_URL: &str = "https://liquipedia.net/counterstrike/FURIA/Results";

/// Liquipedia rejects requests without a descriptive user agent.
pub const SCRAPE_USER_AGENT: &str = concat!(
    "pantera/",
    env!("CARGO_PKG_VERSION"),
    " (FURIA fan assistant)"
);

/// Upper bound on JSON request bodies for `/api/chat`.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Reply sent when the model's safety filter blocks the answer.
pub const CONTENT_BLOCKED_REPLY: &str =
    "Desculpe, não posso responder a isso por motivos de segurança. 😬";

/// Generic error for anything that is not the caller's fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno ao processar a mensagem.";

/// Returned when the request carries no `message`.
pub const MISSING_MESSAGE_ERROR: &str = "Mensagem não fornecida.";

/// Marker the model layer puts in errors caused by its safety filter.
pub const SAFETY_MARKER: &str = "SAFETY";
