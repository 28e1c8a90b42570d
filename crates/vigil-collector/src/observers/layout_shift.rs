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

//! Cumulative-layout-shift observation.

use super::VitalObserver;
use std::borrow::Cow;
use vigil_core::timing::{EntryKind, TimingEntry};
use vigil_core::vitals::VitalsPatch;

/// Accumulates layout-shift magnitudes across the session.
///
/// Shifts that followed recent user input are excluded entirely — they
/// neither grow nor reset the accumulator. The running total only ever
/// increases; each qualifying entry emits a patch carrying the new total.
#[derive(Debug, Default)]
pub struct LayoutShiftObserver {
    accumulated: f64,
}

impl LayoutShiftObserver {
    /// Creates the observer with its accumulator seeded at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The running total accumulated so far.
    pub fn total(&self) -> f64 {
        self.accumulated
    }
}

impl VitalObserver for LayoutShiftObserver {
    fn observer_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("vital.cls")
    }

    fn entry_kind(&self) -> EntryKind {
        EntryKind::LayoutShift
    }

    fn process(&mut self, entries: &[TimingEntry]) -> Vec<VitalsPatch> {
        let mut patches = Vec::new();
        for entry in entries {
            if entry.had_recent_input {
                continue;
            }
            let Some(value) = entry.value else {
                continue;
            };
            self.accumulated += value;
            patches.push(VitalsPatch::cumulative_layout_shift(self.accumulated));
        }
        patches
    }
}
