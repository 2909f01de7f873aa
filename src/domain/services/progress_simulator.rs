#[cfg(test)]
#[path = "progress_simulator_test.rs"]
mod tests;

use super::ScheduledTasks;
use crate::domain::models::ChatEvent;
use crate::domain::models::ProgressScript;
use crate::domain::models::RouteHint;

pub struct ProgressSimulator {}

impl ProgressSimulator {
    /// Schedules every stage of the script for the route, followed by the
    /// settle event. Stage delays are relative to now.
    pub fn start(scheduled: &mut ScheduledTasks, request_id: u64, route_type: &str) {
        let script = ProgressScript::for_route(RouteHint::parse(route_type));
        for stage in script.stages {
            scheduled.schedule(
                stage.delay,
                ChatEvent::ProgressStage { request_id, stage },
            );
        }

        scheduled.schedule(
            script.settle_after,
            ChatEvent::ProgressSettled { request_id },
        );
    }
}
