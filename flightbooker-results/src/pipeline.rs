use flightbooker_core::flight::FlightResult;

use crate::models::{FilterState, ResultsOutcome, ResultsPage, SortKey};

/// Filter, sort and slice the flight list into one page.
///
/// `page` is 1-based and clamped into range. Duration sorting compares the
/// formatted strings ("5h 15m"), not parsed durations, so "10h" sorts before
/// "2h".
pub fn run_pipeline(
    all: &[FlightResult],
    filter: &FilterState,
    page: usize,
    page_size: usize,
) -> ResultsOutcome {
    let mut matching: Vec<&FlightResult> = all.iter().filter(|f| filter.accepts(f)).collect();

    match filter.sort_by {
        SortKey::Price => matching.sort_by_key(|f| f.price),
        SortKey::Duration => matching.sort_by(|a, b| a.total_duration.cmp(&b.total_duration)),
    }

    tracing::debug!(
        "Results pipeline kept {} of {} flights (sort: {:?})",
        matching.len(),
        all.len(),
        filter.sort_by
    );

    if matching.is_empty() {
        return ResultsOutcome::NoResults;
    }

    let page_size = page_size.max(1);
    let total_results = matching.len();
    let total_pages = total_results.div_ceil(page_size);
    let current_page = page.clamp(1, total_pages);

    let flights = matching
        .into_iter()
        .skip((current_page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    ResultsOutcome::Page(ResultsPage {
        flights,
        current_page,
        total_pages,
        total_results,
    })
}
