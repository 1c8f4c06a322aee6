use flightbooker_core::flight::FlightResult;
use std::collections::BTreeSet;

use crate::models::{FilterState, ResultsOutcome, SortKey, StopBucket, DEFAULT_PAGE_SIZE};
use crate::pagination::{page_links, PageLink};
use crate::pipeline::run_pipeline;

/// State behind the results screen: the filter sidebar and the current page.
/// Any filter change sends the user back to page 1.
#[derive(Debug, Clone)]
pub struct ResultsView {
    filter: FilterState,
    page: usize,
    page_size: usize,
}

impl Default for ResultsView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ResultsView {
    pub fn new(page_size: usize) -> Self {
        Self::with_filter(FilterState::default(), page_size)
    }

    pub fn with_filter(filter: FilterState, page_size: usize) -> Self {
        Self {
            filter,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Checkbox behaviour: add the bucket if absent, remove it if present.
    pub fn toggle_stop(&mut self, bucket: StopBucket) {
        if !self.filter.stops.remove(&bucket) {
            self.filter.stops.insert(bucket);
        }
        self.page = 1;
    }

    pub fn set_stops(&mut self, stops: BTreeSet<StopBucket>) {
        self.filter.stops = stops;
        self.page = 1;
    }

    pub fn set_price_range(&mut self, min: u32, max: u32) {
        self.filter.price_range = (min, max);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.filter.sort_by = sort_by;
        self.page = 1;
    }

    /// Moves to `page`, clamped into the pages that exist, and returns the
    /// page actually shown.
    pub fn go_to_page(&mut self, all: &[FlightResult], page: usize) -> usize {
        let total = self.render(all).total_pages().max(1);
        self.page = page.clamp(1, total);
        self.page
    }

    pub fn render(&self, all: &[FlightResult]) -> ResultsOutcome {
        run_pipeline(all, &self.filter, self.page, self.page_size)
    }

    /// Pager links; empty when everything fits on one page.
    pub fn links(&self, all: &[FlightResult]) -> Vec<PageLink> {
        let total = self.render(all).total_pages();
        if total > 1 {
            page_links(self.page, total)
        } else {
            Vec::new()
        }
    }
}
