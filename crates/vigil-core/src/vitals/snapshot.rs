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

//! Snapshot and partial-update types for observed vitals.

use crate::state::{Patch, Patchable};
use crate::timing::{NavigationRecord, ResourceRecord};
use serde::{Deserialize, Serialize};

/// The merged view of every metric observed so far in one session.
///
/// Numeric fields stay `None` until their metric is first observed, and each
/// is only ever written from entries of its own kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// First contentful paint, milliseconds from the time origin.
    pub first_contentful_paint_ms: Option<f64>,
    /// Largest contentful paint, milliseconds from the time origin.
    pub largest_contentful_paint_ms: Option<f64>,
    /// First input delay, milliseconds.
    pub first_input_delay_ms: Option<f64>,
    /// Cumulative layout shift score; monotonically non-decreasing.
    pub cumulative_layout_shift: Option<f64>,
    /// Navigation timing marks, captured once after the document loads.
    pub navigation: Option<NavigationRecord>,
    /// Largest resources by transferred bytes, re-derived per collection.
    pub large_resources: Vec<ResourceRecord>,
}

impl VitalsSnapshot {
    /// Creates an empty snapshot for a fresh monitoring session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the snapshot as a single JSON line for diagnostic sinks.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("failed to serialize vitals snapshot: {e}");
            String::from("{}")
        })
    }
}

/// A partial snapshot update emitted by one observer.
///
/// Fields left `None` are untouched by the merge; there is no way to unset
/// a snapshot field through a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsPatch {
    /// New first-contentful-paint value, if observed.
    pub first_contentful_paint_ms: Option<f64>,
    /// New largest-contentful-paint candidate, if observed.
    pub largest_contentful_paint_ms: Option<f64>,
    /// New first-input-delay value, if observed.
    pub first_input_delay_ms: Option<f64>,
    /// New cumulative-layout-shift total, if it grew.
    pub cumulative_layout_shift: Option<f64>,
    /// Navigation record, on the one-shot post-load capture.
    pub navigation: Option<NavigationRecord>,
    /// Wholesale replacement for the retained large-resource list.
    pub large_resources: Option<Vec<ResourceRecord>>,
}

impl VitalsPatch {
    /// A patch carrying a first-contentful-paint observation.
    pub fn first_contentful_paint(ms: f64) -> Self {
        Self {
            first_contentful_paint_ms: Some(ms),
            ..Self::default()
        }
    }

    /// A patch carrying a largest-contentful-paint candidate.
    pub fn largest_contentful_paint(ms: f64) -> Self {
        Self {
            largest_contentful_paint_ms: Some(ms),
            ..Self::default()
        }
    }

    /// A patch carrying a first-input-delay observation.
    pub fn first_input_delay(ms: f64) -> Self {
        Self {
            first_input_delay_ms: Some(ms),
            ..Self::default()
        }
    }

    /// A patch carrying a new cumulative-layout-shift total.
    pub fn cumulative_layout_shift(total: f64) -> Self {
        Self {
            cumulative_layout_shift: Some(total),
            ..Self::default()
        }
    }

    /// A patch carrying the post-load navigation record.
    pub fn navigation(record: NavigationRecord) -> Self {
        Self {
            navigation: Some(record),
            ..Self::default()
        }
    }

    /// A patch replacing the retained large-resource list.
    pub fn large_resources(resources: Vec<ResourceRecord>) -> Self {
        Self {
            large_resources: Some(resources),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch carries nothing; empty patches merge
    /// as no-ops and are ignored rather than rejected.
    pub fn is_empty(&self) -> bool {
        self.first_contentful_paint_ms.is_none()
            && self.largest_contentful_paint_ms.is_none()
            && self.first_input_delay_ms.is_none()
            && self.cumulative_layout_shift.is_none()
            && self.navigation.is_none()
            && self.large_resources.is_none()
    }
}

impl Patch for VitalsPatch {
    fn merge(&mut self, newer: Self) {
        if newer.first_contentful_paint_ms.is_some() {
            self.first_contentful_paint_ms = newer.first_contentful_paint_ms;
        }
        if newer.largest_contentful_paint_ms.is_some() {
            self.largest_contentful_paint_ms = newer.largest_contentful_paint_ms;
        }
        if newer.first_input_delay_ms.is_some() {
            self.first_input_delay_ms = newer.first_input_delay_ms;
        }
        if newer.cumulative_layout_shift.is_some() {
            self.cumulative_layout_shift = newer.cumulative_layout_shift;
        }
        if newer.navigation.is_some() {
            self.navigation = newer.navigation;
        }
        if newer.large_resources.is_some() {
            self.large_resources = newer.large_resources;
        }
    }
}

impl Patchable for VitalsSnapshot {
    type Patch = VitalsPatch;

    fn apply_patch(&mut self, patch: VitalsPatch) {
        if let Some(ms) = patch.first_contentful_paint_ms {
            self.first_contentful_paint_ms = Some(ms);
        }
        if let Some(ms) = patch.largest_contentful_paint_ms {
            self.largest_contentful_paint_ms = Some(ms);
        }
        if let Some(ms) = patch.first_input_delay_ms {
            self.first_input_delay_ms = Some(ms);
        }
        if let Some(total) = patch.cumulative_layout_shift {
            self.cumulative_layout_shift = Some(total);
        }
        if let Some(record) = patch.navigation {
            self.navigation = Some(record);
        }
        if let Some(resources) = patch.large_resources {
            self.large_resources = resources;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merge_is_shallow_and_leaves_other_fields_alone() {
        let mut snapshot = VitalsSnapshot::new();
        snapshot.apply_patch(VitalsPatch::first_contentful_paint(812.0));
        snapshot.apply_patch(VitalsPatch::first_input_delay(24.0));

        assert_eq!(snapshot.first_contentful_paint_ms, Some(812.0));
        assert_eq!(snapshot.first_input_delay_ms, Some(24.0));
        assert_eq!(snapshot.largest_contentful_paint_ms, None);
        assert_eq!(snapshot.cumulative_layout_shift, None);
    }

    #[test]
    fn patches_compose_last_write_wins() {
        let mut accumulated = VitalsPatch::largest_contentful_paint(1200.0);
        accumulated.merge(VitalsPatch::first_input_delay(10.0));
        accumulated.merge(VitalsPatch::largest_contentful_paint(2000.0));

        assert_eq!(accumulated.largest_contentful_paint_ms, Some(2000.0));
        assert_eq!(accumulated.first_input_delay_ms, Some(10.0));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(VitalsPatch::default().is_empty());
        assert!(!VitalsPatch::cumulative_layout_shift(0.1).is_empty());
    }

    #[test]
    fn large_resource_patch_replaces_wholesale() {
        let mut snapshot = VitalsSnapshot::new();
        snapshot.large_resources = vec![ResourceRecord {
            name: "old.js".to_string(),
            transfer_size_bytes: 200_000,
            duration_ms: 5.0,
        }];

        snapshot.apply_patch(VitalsPatch::large_resources(vec![]));
        assert!(snapshot.large_resources.is_empty());
    }

    #[test]
    fn json_rendering_round_trips() {
        let mut snapshot = VitalsSnapshot::new();
        snapshot.apply_patch(VitalsPatch::first_contentful_paint(900.0));

        let json = snapshot.to_json_string();
        let parsed: VitalsSnapshot = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed, snapshot);
    }
}
