// Team data scraping
//
// Fetches the roster and results pages, reduces them to a small bounded
// snapshot, and publishes it to the DynamicStore. Failures degrade to empty
// data; they never reach the request path.

pub mod results;
pub mod roster;
mod store;

pub use results::{fetch_results, parse_results, MAX_RESULTS};
pub use roster::{fetch_roster, parse_roster, ScrapedRoster, MAX_COACHES, MAX_PLAYERS};
pub use store::{run_scrape_cycle, spawn_scrape_task, DynamicStore};

use chrono::{DateTime, Utc};
use reqwest::Client;
use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::config::constants::SCRAPE_USER_AGENT;
use crate::errors::ScrapeError;

/// Formatted match summaries, newest first as listed on the page
pub type ScrapedResults = Vec<String>;

/// One scrape snapshot. Immutable once published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicData {
    pub roster: ScrapedRoster,
    pub results: ScrapedResults,
    pub scraped_at: DateTime<Utc>,
}

/// The two pages a scrape cycle reads
#[derive(Debug, Clone)]
pub struct ScrapeTargets {
    pub roster_url: String,
    pub results_url: String,
}

/// HTTP client for scrape targets.
///
/// No request timeout is configured; fetches use the client defaults.
pub fn build_client() -> Result<Client, ScrapeError> {
    Ok(Client::builder().user_agent(SCRAPE_USER_AGENT).build()?)
}

/// Scrape both pages concurrently.
///
/// Each side falls back to empty data on its own. Returns `None` only when
/// both fail, so callers can keep whatever snapshot they already have.
pub async fn scrape_dynamic_data(client: &Client, targets: &ScrapeTargets) -> Option<DynamicData> {
    let (roster, results) = tokio::join!(
        fetch_roster(client, &targets.roster_url),
        fetch_results(client, &targets.results_url)
    );

    match (roster, results) {
        (Err(roster_err), Err(results_err)) => {
            tracing::warn!(
                roster_error = %roster_err,
                results_error = %results_err,
                "Both scrapes failed"
            );
            None
        }
        (roster, results) => {
            let roster = roster.unwrap_or_else(|e| {
                tracing::warn!(url = %targets.roster_url, error = %e, "Roster scrape failed");
                ScrapedRoster::default()
            });
            let results = results.unwrap_or_else(|e| {
                tracing::warn!(url = %targets.results_url, error = %e, "Results scrape failed");
                Vec::new()
            });
            Some(DynamicData {
                roster,
                results,
                scraped_at: Utc::now(),
            })
        }
    }
}

/// GET a page and return its body; non-2xx is an error.
async fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    tracing::debug!(url, "Fetching page");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("selector '{}': {}", css, e)))
}

/// Collapse whitespace runs into single spaces and trim.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalised text content of an element.
///
/// Text nodes are concatenated as-is, like DOM `textContent`; only real
/// whitespace separates words.
fn element_text(element: &ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}

/// Direct element children with the given tag name.
fn child_elements<'a>(parent: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}
