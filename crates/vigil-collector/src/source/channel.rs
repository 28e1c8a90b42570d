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

//! The default in-process timing source.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use vigil_core::timing::{
    EntryKind, EntryStream, NavigationRecord, ObserverSupport, ResourceRecord, TimingEntry,
    TimingSource,
};

/// An in-memory [`TimingSource`] fed by the embedding host.
///
/// The host pushes entries with [`push`](ChannelTimingSource::push); each
/// granted [`EntryStream`] receives the entries of its kind through a flume
/// channel and drains them on the session's tick. The supported-kind set is
/// fixed at construction, which also makes degraded environments (a host
/// without layout-shift instrumentation, say) representable.
#[derive(Debug)]
pub struct ChannelTimingSource {
    supported: HashSet<EntryKind>,
    state: RwLock<SourceState>,
}

#[derive(Debug, Default)]
struct SourceState {
    senders: HashMap<EntryKind, Vec<flume::Sender<TimingEntry>>>,
    navigation: Option<NavigationRecord>,
    resources: Vec<ResourceRecord>,
}

impl ChannelTimingSource {
    /// Creates a source supporting every entry kind.
    pub fn new() -> Self {
        Self::with_supported(EntryKind::ALL)
    }

    /// Creates a source supporting only the given kinds.
    pub fn with_supported(kinds: impl IntoIterator<Item = EntryKind>) -> Self {
        Self {
            supported: kinds.into_iter().collect(),
            state: RwLock::new(SourceState::default()),
        }
    }

    /// Delivers one entry to every live stream of its kind.
    ///
    /// Entries of unsupported kinds are dropped with a trace, mirroring a
    /// host instrument that was never switched on.
    pub fn push(&self, entry: TimingEntry) {
        if !self.supported.contains(&entry.kind) {
            log::trace!("dropping {} entry: kind not supported", entry.kind);
            return;
        }

        let mut state = self.state.write().unwrap();
        if let Some(senders) = state.senders.get_mut(&entry.kind) {
            // Prune streams whose receiving half has been dropped.
            senders.retain(|sender| !sender.is_disconnected());
            for sender in senders.iter() {
                let _ = sender.send(entry.clone());
            }
        }
    }

    /// Delivers a batch of entries in order.
    pub fn push_batch(&self, entries: Vec<TimingEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    /// Stages the navigation record returned by the one-shot query.
    pub fn set_navigation(&self, record: NavigationRecord) {
        self.state.write().unwrap().navigation = Some(record);
    }

    /// Replaces the staged resource-timing entries.
    pub fn set_resources(&self, resources: Vec<ResourceRecord>) {
        self.state.write().unwrap().resources = resources;
    }
}

impl TimingSource for ChannelTimingSource {
    fn source_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("channel-timing-source")
    }

    fn observe(&self, kind: EntryKind) -> ObserverSupport {
        if !self.supported.contains(&kind) {
            return ObserverSupport::Unsupported;
        }

        let (sender, receiver) = flume::unbounded();
        let mut state = self.state.write().unwrap();
        state.senders.entry(kind).or_default().push(sender);
        log::debug!("granted {kind} stream");
        ObserverSupport::Supported(EntryStream::new(kind, receiver))
    }

    fn navigation_timing(&self) -> Option<NavigationRecord> {
        self.state.read().unwrap().navigation.clone()
    }

    fn resource_entries(&self) -> Vec<ResourceRecord> {
        self.state.read().unwrap().resources.clone()
    }
}

impl Default for ChannelTimingSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_route_to_streams_of_their_kind() {
        let source = ChannelTimingSource::new();
        let paints = source
            .observe(EntryKind::Paint)
            .into_stream(EntryKind::Paint)
            .unwrap();
        let shifts = source
            .observe(EntryKind::LayoutShift)
            .into_stream(EntryKind::LayoutShift)
            .unwrap();

        source.push(TimingEntry::paint("first-paint", 500.0));
        source.push(TimingEntry::layout_shift(0.1, false));

        assert_eq!(paints.drain().len(), 1);
        assert_eq!(shifts.drain().len(), 1);
    }

    #[test]
    fn unsupported_kind_is_probed_not_thrown() {
        let source = ChannelTimingSource::with_supported([EntryKind::Paint]);
        assert!(source.observe(EntryKind::Paint).is_supported());
        assert!(!source.observe(EntryKind::FirstInput).is_supported());

        // Pushing an unsupported entry is a silent drop, not a panic.
        source.push(TimingEntry::first_input(10.0, 20.0));
    }

    #[test]
    fn dropped_streams_are_pruned_on_the_next_push() {
        let source = ChannelTimingSource::new();
        let stream = source
            .observe(EntryKind::Paint)
            .into_stream(EntryKind::Paint)
            .unwrap();
        drop(stream);

        source.push(TimingEntry::paint("first-paint", 100.0));
        let state = source.state.read().unwrap();
        assert!(state.senders.get(&EntryKind::Paint).unwrap().is_empty());
    }

    #[test]
    fn one_shot_queries_return_staged_data() {
        let source = ChannelTimingSource::new();
        assert!(source.navigation_timing().is_none());
        assert!(source.resource_entries().is_empty());

        source.set_navigation(NavigationRecord {
            load_event_ms: Some(1800.0),
            ..NavigationRecord::default()
        });
        source.set_resources(vec![ResourceRecord {
            name: "bundle.js".to_string(),
            transfer_size_bytes: 250_000,
            duration_ms: 120.0,
        }]);

        assert_eq!(
            source.navigation_timing().unwrap().load_event_ms,
            Some(1800.0)
        );
        assert_eq!(source.resource_entries().len(), 1);
    }

    #[test]
    fn independent_streams_each_receive_the_entry() {
        let source = ChannelTimingSource::new();
        let a = source
            .observe(EntryKind::LargestContentfulPaint)
            .into_stream(EntryKind::LargestContentfulPaint)
            .unwrap();
        let b = source
            .observe(EntryKind::LargestContentfulPaint)
            .into_stream(EntryKind::LargestContentfulPaint)
            .unwrap();

        source.push(TimingEntry::largest_contentful_paint(1500.0));
        assert_eq!(a.drain().len(), 1);
        assert_eq!(b.drain().len(), 1);
    }
}
