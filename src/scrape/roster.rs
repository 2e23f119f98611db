// Roster page scraper
//
// Player and coach names come from the bolded link in the first cell of each
// roster table row. The link's title attribute is the canonical name.

use reqwest::Client;
use scraper::{ElementRef, Html};
use serde::Serialize;

use super::{element_text, fetch_page, normalize_text, selector};
use crate::errors::ScrapeError;

pub const MAX_PLAYERS: usize = 5;
pub const MAX_COACHES: usize = 1;

/// Name links inside the first cell of a roster table row
const NAME_LINK_SELECTOR: &str = "table.roster-card tr > td:first-child b a";

/// Row text marker for coaching staff
const COACH_MARKER: &str = "(coach)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapedRoster {
    /// Up to MAX_PLAYERS unique names, document order
    pub players: Vec<String>,
    /// Up to MAX_COACHES unique names, document order
    pub coach: Vec<String>,
}

impl ScrapedRoster {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.coach.is_empty()
    }

    fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS && self.coach.len() >= MAX_COACHES
    }

    /// Add a name to the right list, respecting caps and skipping noise.
    fn push(&mut self, name: String, is_coach: bool) {
        if name.chars().count() <= 1 {
            return;
        }
        let (list, cap) = if is_coach {
            (&mut self.coach, MAX_COACHES)
        } else {
            (&mut self.players, MAX_PLAYERS)
        };
        if list.len() < cap && !list.contains(&name) {
            list.push(name);
        }
    }
}

/// Fetch and parse the roster page.
pub async fn fetch_roster(client: &Client, url: &str) -> Result<ScrapedRoster, ScrapeError> {
    let html = fetch_page(client, url).await?;
    let roster = parse_roster(&html)?;
    tracing::info!(
        url,
        players = roster.players.len(),
        coach = roster.coach.len(),
        "Roster scraped"
    );
    Ok(roster)
}

/// Extract names from roster HTML.
///
/// A page without a roster table yields an empty roster, not an error.
pub fn parse_roster(html: &str) -> Result<ScrapedRoster, ScrapeError> {
    let document = Html::parse_document(html);
    let links = selector(NAME_LINK_SELECTOR)?;

    let mut roster = ScrapedRoster::default();
    for link in document.select(&links) {
        let name = normalize_text(link.value().attr("title").unwrap_or_default());
        let is_coach = enclosing_row(link)
            .map(|row| element_text(&row).to_lowercase().contains(COACH_MARKER))
            .unwrap_or(false);

        roster.push(name, is_coach);
        if roster.is_full() {
            break;
        }
    }
    Ok(roster)
}

fn enclosing_row(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "tr")
}
