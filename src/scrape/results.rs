// Results page scraper
//
// Reads the first sortable results table. Row 1 is the header; rows 2-6 are
// candidates. A row is kept only if every field it needs is present.

use reqwest::Client;
use scraper::{ElementRef, Html};

use super::{child_elements, element_text, fetch_page, normalize_text, selector, ScrapedResults};
use crate::errors::ScrapeError;

pub const MAX_RESULTS: usize = 5;

const RESULTS_TABLE_SELECTOR: &str = "table.wikitable.sortable";

/// Data cells a row must have before we look at it
const MIN_COLUMNS: usize = 9;

const DATE_COL: usize = 0;
const PLACEMENT_COL: usize = 1;
const TOURNAMENT_COL: usize = 6;
const SCORE_COL: usize = 7;
const OPPONENT_COL: usize = 8;

/// One accepted results row
#[derive(Debug, Clone, PartialEq, Eq)]
struct MatchResult {
    date: String,
    tournament: String,
    placement: String,
    score: String,
    opponent: String,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}: {} ({} vs {})",
            self.date, self.tournament, self.placement, self.score, self.opponent
        )
    }
}

/// Fetch and parse the results page.
pub async fn fetch_results(client: &Client, url: &str) -> Result<ScrapedResults, ScrapeError> {
    let html = fetch_page(client, url).await?;
    let results = parse_results(&html)?;
    tracing::info!(url, results = results.len(), "Results scraped");
    Ok(results)
}

/// Extract formatted match summaries from results HTML.
///
/// No results table means no results, not an error.
pub fn parse_results(html: &str) -> Result<ScrapedResults, ScrapeError> {
    let document = Html::parse_document(html);
    let table_selector = selector(RESULTS_TABLE_SELECTOR)?;
    let bold = selector("b")?;
    let link = selector("a")?;

    let Some(table) = document.select(&table_selector).next() else {
        tracing::debug!("No results table on page");
        return Ok(Vec::new());
    };

    let rows = table_rows(table).skip(1).take(MAX_RESULTS);
    let results = rows
        .filter_map(|row| {
            let parsed = parse_row(row, &bold, &link);
            if parsed.is_none() {
                tracing::debug!(row = %element_text(&row), "Skipping incomplete results row");
            }
            parsed
        })
        .map(|result| result.to_string())
        .collect();

    Ok(results)
}

/// Rows of this table only; nested tables are not descended into.
///
/// The HTML parser moves bare `tr` children into an implied `tbody`, so rows
/// always sit inside a section.
fn table_rows(table: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    table
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|section| matches!(section.value().name(), "thead" | "tbody" | "tfoot"))
        .flat_map(|section| child_elements(section, "tr"))
}

fn parse_row(
    row: ElementRef<'_>,
    bold: &scraper::Selector,
    link: &scraper::Selector,
) -> Option<MatchResult> {
    let cells: Vec<ElementRef<'_>> = child_elements(row, "td").collect();
    if cells.len() < MIN_COLUMNS {
        return None;
    }

    let date = element_text(&cells[DATE_COL]);

    let placement = cells[PLACEMENT_COL]
        .select(bold)
        .next()
        .map(|b| element_text(&b))
        .unwrap_or_default();

    // Breadcrumb links come first; the last one names the event itself.
    let tournament = cells[TOURNAMENT_COL]
        .select(link)
        .last()
        .map(|a| element_text(&a))
        .unwrap_or_default();

    let score = element_text(&cells[SCORE_COL]);

    let opponent = cells[OPPONENT_COL]
        .select(link)
        .next()
        .map(|a| {
            a.value()
                .attr("title")
                .map(normalize_text)
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| element_text(&a))
        })
        .unwrap_or_default();

    let result = MatchResult {
        date,
        tournament,
        placement,
        score,
        opponent,
    };

    let complete = [
        &result.date,
        &result.tournament,
        &result.placement,
        &result.score,
        &result.opponent,
    ]
    .iter()
    .all(|field| !field.is_empty());

    complete.then_some(result)
}
