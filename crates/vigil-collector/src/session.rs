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

//! The per-page monitoring session.

use crate::aggregator::{SnapshotCallback, SubscriberId, VitalsAggregator};
use crate::config::CollectorConfig;
use crate::observers::{standard_observers, VitalObserver};
use crate::scheduler::SummaryScheduler;
use crate::score::health_score;
use std::fmt::{self, Debug};
use std::sync::Arc;
use vigil_core::timing::{largest_resources, EntryStream, ObserverSupport, TimingSource};
use vigil_core::vitals::{VitalsPatch, VitalsSnapshot};

/// One observer bound to the stream it drains.
struct ObserverSlot {
    observer: Box<dyn VitalObserver>,
    stream: EntryStream,
}

/// Drives one monitoring session over a host-supplied timing source.
///
/// A session owns everything with session lifetime: the snapshot (through
/// its aggregator), the observer set, the granted entry streams, and the
/// summary cadence. The embedding host calls [`tick`](CollectorSession::tick)
/// from its update loop and [`document_loaded`](CollectorSession::document_loaded)
/// once the page has fully loaded; [`close`](CollectorSession::close)
/// releases every granted stream exactly once and is also run on drop.
pub struct CollectorSession {
    source: Arc<dyn TimingSource>,
    config: CollectorConfig,
    aggregator: VitalsAggregator,
    slots: Vec<ObserverSlot>,
    summary: SummaryScheduler,
    navigation_captured: bool,
    closed: bool,
}

impl CollectorSession {
    /// Starts a session: probes the source for each observable kind and
    /// binds an observer to every granted stream.
    ///
    /// Kinds the source cannot observe are skipped with a warning; their
    /// metrics stay unset for the whole session. Registration is never
    /// fatal.
    pub fn start(source: Arc<dyn TimingSource>, config: CollectorConfig) -> Self {
        let mut slots = Vec::new();

        for observer in standard_observers() {
            let kind = observer.entry_kind();
            match source.observe(kind) {
                ObserverSupport::Supported(stream) => {
                    log::debug!("observer {} attached", observer.observer_id());
                    slots.push(ObserverSlot { observer, stream });
                }
                ObserverSupport::Unsupported => {
                    log::warn!(
                        "{} does not support {kind} entries; metric will stay unset",
                        source.source_id()
                    );
                }
            }
        }

        let summary = SummaryScheduler::new(config.summary_interval());
        Self {
            source,
            config,
            aggregator: VitalsAggregator::new(),
            slots,
            summary,
            navigation_captured: false,
            closed: false,
        }
    }

    /// Drains every granted stream and folds the resulting updates into the
    /// snapshot. Also emits the periodic summary when one is due.
    ///
    /// Safe to call at any cadence; a tick with no pending entries is cheap.
    pub fn tick(&mut self) {
        if self.closed {
            return;
        }

        let mut patches = Vec::new();
        for slot in self.slots.iter_mut() {
            let entries = slot.stream.drain();
            if entries.is_empty() {
                continue;
            }
            patches.extend(slot.observer.process(&entries));
        }
        for patch in patches {
            self.apply(patch);
        }

        self.summary.maybe_log(self.aggregator.snapshot());
    }

    /// Runs the one-shot post-load captures: navigation timing (first call
    /// only) and, when enabled, a wholesale large-resource refresh.
    pub fn document_loaded(&mut self) {
        if self.closed {
            return;
        }

        if !self.navigation_captured {
            if let Some(record) = self.source.navigation_timing() {
                self.apply(VitalsPatch::navigation(record));
            }
            self.navigation_captured = true;
        }

        self.refresh_resources();
    }

    /// Re-derives the retained large-resource list from the source's full
    /// resource dump. A no-op when resource timing is disabled.
    pub fn refresh_resources(&mut self) {
        if self.closed || !self.config.resource_timing {
            return;
        }

        let retained = largest_resources(self.source.resource_entries());
        self.apply(VitalsPatch::large_resources(retained));
    }

    fn apply(&mut self, patch: VitalsPatch) {
        if patch.is_empty() {
            return;
        }
        self.aggregator.apply(patch);
        if self.config.log_updates {
            log::debug!("vitals update: {}", self.aggregator.snapshot().to_json_string());
        }
    }

    /// A clone of the current snapshot.
    pub fn snapshot(&self) -> VitalsSnapshot {
        self.aggregator.current()
    }

    /// The current health score, computed on demand.
    pub fn score(&self) -> u8 {
        health_score(self.aggregator.snapshot())
    }

    /// Registers a callback for every future merge.
    pub fn subscribe(&mut self, callback: SnapshotCallback) -> SubscriberId {
        self.aggregator.subscribe(callback)
    }

    /// Removes a subscription; returns whether the handle was still live.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.aggregator.unsubscribe(id)
    }

    /// The number of observers that obtained a stream at start.
    pub fn active_observers(&self) -> usize {
        self.slots.len()
    }

    /// The configuration this session runs with.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Whether [`close`](CollectorSession::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Releases every granted stream and subscription. Idempotent; after
    /// closing, `tick` and the capture calls become no-ops while the final
    /// snapshot stays readable.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        // Dropping the slots drops the streams, disconnecting their
        // channels; the source prunes the dead senders on its next push.
        self.slots.clear();
        self.aggregator.clear_subscribers();
        self.closed = true;
        log::debug!("session over {} closed", self.source.source_id());
    }
}

impl Drop for CollectorSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl Debug for CollectorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorSession")
            .field("source", &self.source.source_id())
            .field("active_observers", &self.slots.len())
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChannelTimingSource;
    use vigil_core::timing::{EntryKind, NavigationRecord, ResourceRecord, TimingEntry};

    fn full_source() -> Arc<ChannelTimingSource> {
        Arc::new(ChannelTimingSource::new())
    }

    #[test]
    fn start_attaches_all_four_observers() {
        let session = CollectorSession::start(full_source(), CollectorConfig::default());
        assert_eq!(session.active_observers(), 4);
        assert!(!session.is_closed());
    }

    #[test]
    fn unsupported_kinds_degrade_to_partial_data() {
        let source = Arc::new(ChannelTimingSource::with_supported([
            EntryKind::Paint,
            EntryKind::LayoutShift,
        ]));
        let mut session = CollectorSession::start(source.clone(), CollectorConfig::default());
        assert_eq!(session.active_observers(), 2);

        source.push(TimingEntry::paint("first-contentful-paint", 900.0));
        session.tick();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.first_contentful_paint_ms, Some(900.0));
        // The unsupported metrics stay unset and cost the score nothing.
        assert_eq!(snapshot.first_input_delay_ms, None);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn tick_folds_entries_into_the_snapshot() {
        let source = full_source();
        let mut session = CollectorSession::start(source.clone(), CollectorConfig::default());

        source.push_batch(vec![
            TimingEntry::paint("first-paint", 640.0),
            TimingEntry::paint("first-contentful-paint", 812.0),
            TimingEntry::largest_contentful_paint(1200.0),
            TimingEntry::largest_contentful_paint(2000.0),
            TimingEntry::first_input(1000.0, 1030.0),
            TimingEntry::layout_shift(0.05, false),
            TimingEntry::layout_shift(0.4, true),
        ]);
        session.tick();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.first_contentful_paint_ms, Some(812.0));
        assert_eq!(snapshot.largest_contentful_paint_ms, Some(2000.0));
        assert_eq!(snapshot.first_input_delay_ms, Some(30.0));
        assert_eq!(snapshot.cumulative_layout_shift, Some(0.05));
    }

    #[test]
    fn navigation_is_captured_exactly_once() {
        let source = full_source();
        source.set_navigation(NavigationRecord {
            load_event_ms: Some(1500.0),
            ..NavigationRecord::default()
        });
        let mut config = CollectorConfig::default();
        config.resource_timing = false;
        let mut session = CollectorSession::start(source.clone(), config);

        session.document_loaded();
        assert_eq!(
            session.snapshot().navigation.unwrap().load_event_ms,
            Some(1500.0)
        );

        // A later record does not overwrite the captured one.
        source.set_navigation(NavigationRecord {
            load_event_ms: Some(9999.0),
            ..NavigationRecord::default()
        });
        session.document_loaded();
        assert_eq!(
            session.snapshot().navigation.unwrap().load_event_ms,
            Some(1500.0)
        );
    }

    #[test]
    fn resource_refresh_respects_the_config_gate() {
        let source = full_source();
        source.set_resources(vec![ResourceRecord {
            name: "vendor.js".to_string(),
            transfer_size_bytes: 250_000,
            duration_ms: 80.0,
        }]);

        let mut config = CollectorConfig::default();
        config.resource_timing = false;
        let mut session = CollectorSession::start(source.clone(), config);
        session.document_loaded();
        assert!(session.snapshot().large_resources.is_empty());

        let mut session = CollectorSession::start(source, CollectorConfig::default());
        session.document_loaded();
        assert_eq!(session.snapshot().large_resources.len(), 1);
    }

    #[test]
    fn close_is_idempotent_and_freezes_the_snapshot() {
        let source = full_source();
        let mut session = CollectorSession::start(source.clone(), CollectorConfig::default());

        source.push(TimingEntry::paint("first-contentful-paint", 700.0));
        session.tick();
        session.close();
        session.close();
        assert!(session.is_closed());
        assert_eq!(session.active_observers(), 0);

        // Entries delivered after close never reach the snapshot.
        source.push(TimingEntry::layout_shift(0.5, false));
        session.tick();
        session.document_loaded();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.first_contentful_paint_ms, Some(700.0));
        assert_eq!(snapshot.cumulative_layout_shift, None);
    }

    #[test]
    fn subscribers_observe_merges_until_unsubscribed() {
        use std::sync::{Arc as StdArc, Mutex};

        let source = full_source();
        let mut session = CollectorSession::start(source.clone(), CollectorConfig::default());
        let count = StdArc::new(Mutex::new(0u32));
        let sink = count.clone();

        let id = session.subscribe(Box::new(move |_| {
            *sink.lock().unwrap() += 1;
        }));

        source.push(TimingEntry::first_input(100.0, 140.0));
        session.tick();
        assert_eq!(*count.lock().unwrap(), 1);

        assert!(session.unsubscribe(id));
        source.push(TimingEntry::first_input(200.0, 220.0));
        session.tick();
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
