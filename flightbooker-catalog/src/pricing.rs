use flightbooker_core::booking::{Ancillary, AncillarySelections};
use serde::{Deserialize, Serialize};

/// Add-on prices, in whole currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub extra_baggage: u32,
    pub travel_insurance: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            extra_baggage: 50,
            travel_insurance: 25,
        }
    }
}

/// Running-total calculator for the booking screen.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn ancillary_price(&self, ancillary: Ancillary) -> u32 {
        match ancillary {
            Ancillary::ExtraBaggage => self.config.extra_baggage,
            Ancillary::TravelInsurance => self.config.travel_insurance,
        }
    }

    /// base fare + each selected add-on.
    pub fn total(&self, base_fare: u32, selections: &AncillarySelections) -> u32 {
        [Ancillary::ExtraBaggage, Ancillary::TravelInsurance]
            .into_iter()
            .filter(|a| selections.is_selected(*a))
            .map(|a| self.ancillary_price(a))
            .fold(base_fare, |total, price| total + price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_for_every_selection() {
        let engine = PricingEngine::default();
        for extra_baggage in [false, true] {
            for travel_insurance in [false, true] {
                let selections = AncillarySelections {
                    extra_baggage,
                    travel_insurance,
                };
                let expected = 350 + 50 * extra_baggage as u32 + 25 * travel_insurance as u32;
                assert_eq!(engine.total(350, &selections), expected);
            }
        }
    }

    #[test]
    fn test_custom_prices() {
        let engine = PricingEngine::new(PricingConfig {
            extra_baggage: 60,
            travel_insurance: 30,
        });
        let all = AncillarySelections {
            extra_baggage: true,
            travel_insurance: true,
        };
        assert_eq!(engine.total(100, &all), 190);
        assert_eq!(engine.ancillary_price(Ancillary::TravelInsurance), 30);
    }
}
