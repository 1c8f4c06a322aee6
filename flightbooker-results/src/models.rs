use flightbooker_core::flight::FlightResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::FilterError;

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_PRICE_RANGE: (u32, u32) = (200, 500);

/// Stop-count filter buckets. Anything with two or more stops lands in
/// `TwoPlus`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StopBucket {
    Direct,
    OneStop,
    TwoPlus,
}

impl StopBucket {
    pub const ALL: [StopBucket; 3] = [StopBucket::Direct, StopBucket::OneStop, StopBucket::TwoPlus];

    pub fn for_stops(stops: u32) -> Self {
        match stops {
            0 => StopBucket::Direct,
            1 => StopBucket::OneStop,
            _ => StopBucket::TwoPlus,
        }
    }
}

impl FromStr for StopBucket {
    type Err = FilterError;

    /// Accepts the checkbox values `0`, `1` and `2` (`2+` also works).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(StopBucket::Direct),
            "1" => Ok(StopBucket::OneStop),
            "2" | "2+" => Ok(StopBucket::TwoPlus),
            other => Err(FilterError::UnknownStopBucket(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Duration,
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortKey::Price),
            "duration" => Ok(SortKey::Duration),
            other => Err(FilterError::UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub stops: BTreeSet<StopBucket>,
    /// Inclusive on both ends.
    pub price_range: (u32, u32),
    pub sort_by: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            stops: StopBucket::ALL.into_iter().collect(),
            price_range: DEFAULT_PRICE_RANGE,
            sort_by: SortKey::Price,
        }
    }
}

impl FilterState {
    pub fn accepts(&self, flight: &FlightResult) -> bool {
        let (min, max) = self.price_range;
        self.stops.contains(&StopBucket::for_stops(flight.stops))
            && flight.price >= min
            && flight.price <= max
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPage {
    pub flights: Vec<FlightResult>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_results: usize,
}

/// What the results list renders: a page, or the "No flights found" panel.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsOutcome {
    NoResults,
    Page(ResultsPage),
}

impl ResultsOutcome {
    pub fn total_pages(&self) -> usize {
        match self {
            ResultsOutcome::NoResults => 0,
            ResultsOutcome::Page(page) => page.total_pages,
        }
    }

    pub fn flights(&self) -> &[FlightResult] {
        match self {
            ResultsOutcome::NoResults => &[],
            ResultsOutcome::Page(page) => &page.flights,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResultsOutcome::NoResults)
    }
}

/// Values carried in from a homepage deal link. They seed the search form
/// and are never used to reject a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchPrefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_buckets() {
        assert_eq!(StopBucket::for_stops(0), StopBucket::Direct);
        assert_eq!(StopBucket::for_stops(1), StopBucket::OneStop);
        assert_eq!(StopBucket::for_stops(2), StopBucket::TwoPlus);
        assert_eq!(StopBucket::for_stops(5), StopBucket::TwoPlus);
        assert_eq!("2+".parse::<StopBucket>(), Ok(StopBucket::TwoPlus));
        assert!("3".parse::<StopBucket>().is_err());
    }

    #[test]
    fn test_default_filter() {
        let filter = FilterState::default();
        assert_eq!(filter.stops.len(), 3);
        assert_eq!(filter.price_range, (200, 500));
        assert_eq!(filter.sort_by, SortKey::Price);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(ResultsOutcome::NoResults).unwrap();
        assert_eq!(json["status"], "no_results");
    }
}
