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

//! Largest-contentful-paint observation.

use super::VitalObserver;
use std::borrow::Cow;
use vigil_core::timing::{EntryKind, TimingEntry};
use vigil_core::vitals::VitalsPatch;

/// Tracks the current largest-contentful-paint candidate.
///
/// The last entry of each delivered batch replaces the previous candidate —
/// the host reports candidates in nondecreasing significance within a batch,
/// so the batch tail is the freshest. Note this is last-reported, not a
/// running maximum across batches.
#[derive(Debug, Default)]
pub struct LargestPaintObserver;

impl LargestPaintObserver {
    /// Creates the observer.
    pub fn new() -> Self {
        Self
    }
}

impl VitalObserver for LargestPaintObserver {
    fn observer_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("vital.lcp")
    }

    fn entry_kind(&self) -> EntryKind {
        EntryKind::LargestContentfulPaint
    }

    fn process(&mut self, entries: &[TimingEntry]) -> Vec<VitalsPatch> {
        match entries.last() {
            Some(latest) => vec![VitalsPatch::largest_contentful_paint(latest.start_time_ms)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(starts: &[f64]) -> Vec<TimingEntry> {
        starts
            .iter()
            .map(|&s| TimingEntry::largest_contentful_paint(s))
            .collect()
    }

    #[test]
    fn last_entry_in_the_batch_wins() {
        let mut observer = LargestPaintObserver::new();
        let patches = observer.process(&batch(&[1200.0, 800.0, 2000.0]));

        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].largest_contentful_paint_ms, Some(2000.0));
    }

    #[test]
    fn later_batches_replace_earlier_candidates() {
        let mut observer = LargestPaintObserver::new();
        observer.process(&batch(&[2400.0]));
        let patches = observer.process(&batch(&[1800.0]));

        // Last-reported, not max: a smaller later candidate still wins.
        assert_eq!(patches[0].largest_contentful_paint_ms, Some(1800.0));
    }

    #[test]
    fn empty_batch_emits_nothing() {
        let mut observer = LargestPaintObserver::new();
        assert!(observer.process(&[]).is_empty());
    }
}
