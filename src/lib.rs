// Pantera - FURIA fan chat relay
// Library exports

pub mod bridge;
pub mod config;
pub mod context;
pub mod errors;
pub mod providers;
pub mod scrape;
pub mod server;
