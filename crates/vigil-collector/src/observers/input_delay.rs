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

//! First-input-delay observation.

use super::VitalObserver;
use std::borrow::Cow;
use vigil_core::timing::{EntryKind, TimingEntry};
use vigil_core::vitals::VitalsPatch;

/// Computes input delay from first-input entries.
///
/// Each qualifying entry — one carrying its `processing_start_ms` mark —
/// yields one patch with `processing_start - start_time`. Entries missing
/// the mark are skipped silently.
#[derive(Debug, Default)]
pub struct InputDelayObserver;

impl InputDelayObserver {
    /// Creates the observer.
    pub fn new() -> Self {
        Self
    }
}

impl VitalObserver for InputDelayObserver {
    fn observer_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("vital.fid")
    }

    fn entry_kind(&self) -> EntryKind {
        EntryKind::FirstInput
    }

    fn process(&mut self, entries: &[TimingEntry]) -> Vec<VitalsPatch> {
        entries
            .iter()
            .filter_map(|entry| {
                let processing_start = entry.processing_start_ms?;
                Some(VitalsPatch::first_input_delay(
                    processing_start - entry.start_time_ms,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_processing_start_minus_start_time() {
        let mut observer = InputDelayObserver::new();
        let batch = vec![TimingEntry::first_input(1000.0, 1024.0)];

        let patches = observer.process(&batch);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].first_input_delay_ms, Some(24.0));
    }

    #[test]
    fn entries_without_processing_start_are_skipped() {
        let mut observer = InputDelayObserver::new();
        let mut malformed = TimingEntry::first_input(1000.0, 1024.0);
        malformed.processing_start_ms = None;

        let batch = vec![malformed, TimingEntry::first_input(2000.0, 2012.0)];
        let patches = observer.process(&batch);

        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].first_input_delay_ms, Some(12.0));
    }

    #[test]
    fn one_patch_per_qualifying_entry() {
        let mut observer = InputDelayObserver::new();
        let batch = vec![
            TimingEntry::first_input(100.0, 150.0),
            TimingEntry::first_input(500.0, 510.0),
        ];

        let patches = observer.process(&batch);
        let delays: Vec<f64> = patches
            .iter()
            .filter_map(|p| p.first_input_delay_ms)
            .collect();
        assert_eq!(delays, vec![50.0, 10.0]);
    }
}
