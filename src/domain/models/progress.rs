#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteHint {
    Sales,
    General,
}

impl RouteHint {
    pub fn parse(route_type: &str) -> RouteHint {
        if route_type == "sales" {
            return RouteHint::Sales;
        }

        return RouteHint::General;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressStage {
    pub label: String,
    pub percent: u8,
    /// Offset from the moment the simulation starts.
    pub delay: Duration,
}

impl ProgressStage {
    fn new(delay_ms: u64, percent: u8, label: &str) -> ProgressStage {
        return ProgressStage {
            label: label.to_string(),
            percent,
            delay: Duration::from_millis(delay_ms),
        };
    }
}

/// Scripted stages shown after an answer arrives. The stages are purely
/// cosmetic and don't reflect what the API did.
pub struct ProgressScript {
    pub stages: Vec<ProgressStage>,
    pub settle_after: Duration,
}

impl ProgressScript {
    pub fn for_route(route: RouteHint) -> ProgressScript {
        if route == RouteHint::Sales {
            return ProgressScript {
                stages: vec![
                    ProgressStage::new(0, 20, "Routing to sales data..."),
                    ProgressStage::new(400, 45, "Searching sales records..."),
                    ProgressStage::new(800, 75, "Analyzing deals and clients..."),
                    ProgressStage::new(1200, 100, "Complete"),
                ],
                settle_after: Duration::from_millis(1500),
            };
        }

        return ProgressScript {
            stages: vec![
                ProgressStage::new(0, 25, "Routing to general assistant..."),
                ProgressStage::new(400, 60, "Composing answer..."),
                ProgressStage::new(800, 100, "Complete"),
            ],
            settle_after: Duration::from_millis(1100),
        };
    }
}
