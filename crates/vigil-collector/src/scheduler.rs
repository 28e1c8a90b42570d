// Copyright 2025 the Vigil Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Periodic summary logging for a running session.

use crate::score::{health_score, summary_lines};
use std::time::Duration;
use vigil_core::vitals::VitalsSnapshot;
use vigil_core::Stopwatch;

/// Emits a snapshot summary to the log at a fixed cadence.
///
/// Host-driven: the session calls [`maybe_log`](SummaryScheduler::maybe_log)
/// on every tick and the scheduler decides whether the interval has elapsed.
#[derive(Debug)]
pub struct SummaryScheduler {
    since_last: Stopwatch,
    interval: Duration,
}

impl SummaryScheduler {
    /// Creates a scheduler with the given interval between summaries.
    pub fn new(interval: Duration) -> Self {
        Self {
            since_last: Stopwatch::new(),
            interval,
        }
    }

    /// Whether the interval has elapsed since the last summary.
    pub fn due(&self) -> bool {
        !self.interval.is_zero()
            && self
                .since_last
                .elapsed()
                .map(|elapsed| elapsed >= self.interval)
                .unwrap_or(false)
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restarts the interval without emitting anything.
    pub fn reset(&mut self) {
        self.since_last = Stopwatch::new();
    }

    /// Logs a summary if one is due; returns whether it was emitted.
    ///
    /// A zero interval disables summaries entirely.
    pub fn maybe_log(&mut self, snapshot: &VitalsSnapshot) -> bool {
        if !self.due() {
            return false;
        }

        log::info!("vitals summary (score {})", health_score(snapshot));
        for line in summary_lines(snapshot) {
            log::info!("  {line}");
        }
        self.reset();
        true
    }
}

impl Default for SummaryScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}
