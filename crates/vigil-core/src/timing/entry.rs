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

//! Raw timing entry types delivered by a host environment.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Entry name carried by the paint entry that marks first contentful paint.
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";

/// Transferred-size threshold above which a resource counts as "large".
pub const LARGE_RESOURCE_THRESHOLD_BYTES: u64 = 100_000;

/// Maximum number of large resources retained per collection.
pub const LARGE_RESOURCE_LIMIT: usize = 10;

/// The kind of measurement a [`TimingEntry`] carries.
///
/// Each kind corresponds to one observable capability of the host
/// environment; a session subscribes to each kind independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Paint milestones (first paint, first contentful paint).
    Paint,
    /// Largest contentful paint candidates.
    LargestContentfulPaint,
    /// First input timing.
    FirstInput,
    /// Layout shift events.
    LayoutShift,
}

impl EntryKind {
    /// All observable entry kinds, in registration order.
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Paint,
        EntryKind::LargestContentfulPaint,
        EntryKind::FirstInput,
        EntryKind::LayoutShift,
    ];

    /// Returns the canonical lowercase name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Paint => "paint",
            EntryKind::LargestContentfulPaint => "largest-contentful-paint",
            EntryKind::FirstInput => "first-input",
            EntryKind::LayoutShift => "layout-shift",
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single raw measurement delivered by the host environment.
///
/// Fields other than `kind` and `start_time_ms` are populated only for the
/// kinds that carry them; consumers skip entries missing a field they need
/// rather than treating them as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingEntry {
    /// The measurement kind.
    pub kind: EntryKind,
    /// Entry name, for kinds that distinguish entries by name (paint).
    pub name: Option<String>,
    /// Milliseconds from the session time origin to the event.
    pub start_time_ms: f64,
    /// When input processing began, for first-input entries.
    pub processing_start_ms: Option<f64>,
    /// Shift magnitude, for layout-shift entries.
    pub value: Option<f64>,
    /// Whether the shift followed recent user input, for layout-shift entries.
    pub had_recent_input: bool,
}

impl TimingEntry {
    /// Creates a paint entry with the given name and start time.
    pub fn paint(name: impl Into<String>, start_time_ms: f64) -> Self {
        Self {
            kind: EntryKind::Paint,
            name: Some(name.into()),
            start_time_ms,
            processing_start_ms: None,
            value: None,
            had_recent_input: false,
        }
    }

    /// Creates a largest-contentful-paint candidate entry.
    pub fn largest_contentful_paint(start_time_ms: f64) -> Self {
        Self {
            kind: EntryKind::LargestContentfulPaint,
            name: None,
            start_time_ms,
            processing_start_ms: None,
            value: None,
            had_recent_input: false,
        }
    }

    /// Creates a first-input entry with its processing start mark.
    pub fn first_input(start_time_ms: f64, processing_start_ms: f64) -> Self {
        Self {
            kind: EntryKind::FirstInput,
            name: None,
            start_time_ms,
            processing_start_ms: Some(processing_start_ms),
            value: None,
            had_recent_input: false,
        }
    }

    /// Creates a layout-shift entry.
    pub fn layout_shift(value: f64, had_recent_input: bool) -> Self {
        Self {
            kind: EntryKind::LayoutShift,
            name: None,
            start_time_ms: 0.0,
            processing_start_ms: None,
            value: Some(value),
            had_recent_input,
        }
    }
}

/// Navigation timing marks captured once the document has fully loaded.
///
/// The record is externally supplied and carried opaquely in the snapshot;
/// absent marks stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationRecord {
    /// Milliseconds until the DOMContentLoaded event.
    pub dom_content_loaded_ms: Option<f64>,
    /// Milliseconds until the load event.
    pub load_event_ms: Option<f64>,
    /// Milliseconds until the document became interactive.
    pub dom_interactive_ms: Option<f64>,
    /// Milliseconds until the first response byte.
    pub response_start_ms: Option<f64>,
}

/// One resource fetched by the page, as reported by resource timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Resource URL or identifier.
    pub name: String,
    /// Bytes transferred over the network for this resource.
    pub transfer_size_bytes: u64,
    /// Total fetch duration in milliseconds.
    pub duration_ms: f64,
}

/// Re-derives the retained large-resource list from a full resource dump.
///
/// Keeps entries whose transferred size exceeds
/// [`LARGE_RESOURCE_THRESHOLD_BYTES`], sorted descending by size, truncated
/// to [`LARGE_RESOURCE_LIMIT`]. The result replaces any previously retained
/// list wholesale; nothing is patched incrementally.
pub fn largest_resources(entries: Vec<ResourceRecord>) -> Vec<ResourceRecord> {
    let mut retained: Vec<ResourceRecord> = entries
        .into_iter()
        .filter(|r| r.transfer_size_bytes > LARGE_RESOURCE_THRESHOLD_BYTES)
        .collect();
    retained.sort_by(|a, b| b.transfer_size_bytes.cmp(&a.transfer_size_bytes));
    retained.truncate(LARGE_RESOURCE_LIMIT);
    retained
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str, transfer_size_bytes: u64) -> ResourceRecord {
        ResourceRecord {
            name: name.to_string(),
            transfer_size_bytes,
            duration_ms: 12.0,
        }
    }

    #[test]
    fn entry_kind_names() {
        assert_eq!(EntryKind::Paint.as_str(), "paint");
        assert_eq!(
            EntryKind::LargestContentfulPaint.to_string(),
            "largest-contentful-paint"
        );
        assert_eq!(EntryKind::ALL.len(), 4);
    }

    #[test]
    fn paint_constructor_sets_name() {
        let entry = TimingEntry::paint(FIRST_CONTENTFUL_PAINT, 812.5);
        assert_eq!(entry.kind, EntryKind::Paint);
        assert_eq!(entry.name.as_deref(), Some(FIRST_CONTENTFUL_PAINT));
        assert_eq!(entry.start_time_ms, 812.5);
    }

    #[test]
    fn largest_resources_filters_sorts_and_truncates() {
        let entries = vec![
            resource("small.css", 50_000),
            resource("vendor.js", 150_000),
            resource("hero.png", 300_000),
            resource("app.js", 120_000),
        ];

        let retained = largest_resources(entries);
        let sizes: Vec<u64> = retained.iter().map(|r| r.transfer_size_bytes).collect();
        assert_eq!(sizes, vec![300_000, 150_000, 120_000]);
    }

    #[test]
    fn largest_resources_respects_the_retention_limit() {
        let entries: Vec<ResourceRecord> = (0..20)
            .map(|i| resource(&format!("r{i}"), 200_000 + i as u64))
            .collect();

        let retained = largest_resources(entries);
        assert_eq!(retained.len(), LARGE_RESOURCE_LIMIT);
        // Largest first.
        assert_eq!(retained[0].transfer_size_bytes, 200_019);
    }

    #[test]
    fn threshold_is_exclusive() {
        let entries = vec![resource("edge.js", LARGE_RESOURCE_THRESHOLD_BYTES)];
        assert!(largest_resources(entries).is_empty());
    }
}
