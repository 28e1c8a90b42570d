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

//! Snapshot ownership, merging, and subscriber notification.

use std::fmt::{self, Debug, Display};
use uuid::Uuid;
use vigil_core::state::Patchable;
use vigil_core::vitals::{VitalsPatch, VitalsSnapshot};

/// Callback invoked with the full snapshot after each merge.
pub type SnapshotCallback = Box<dyn FnMut(&VitalsSnapshot) + Send>;

/// Handle identifying one snapshot subscription.
///
/// Returned by [`VitalsAggregator::subscribe`] and redeemed exactly once by
/// [`VitalsAggregator::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns the session snapshot and pushes it to subscribers on every merge.
///
/// Merging and notification are synchronous: callbacks run on the caller's
/// thread, in subscription order, inside the same `apply` call that merged
/// the patch. The rendering or logging step reacting to a notification is a
/// consumer concern, never part of this type.
pub struct VitalsAggregator {
    snapshot: VitalsSnapshot,
    subscribers: Vec<(SubscriberId, SnapshotCallback)>,
}

impl VitalsAggregator {
    /// Creates an aggregator with an empty snapshot and no subscribers.
    pub fn new() -> Self {
        Self {
            snapshot: VitalsSnapshot::new(),
            subscribers: Vec::new(),
        }
    }

    /// Merges a partial update and notifies every subscriber.
    ///
    /// Empty patches are ignored rather than rejected: no merge happens and
    /// no notification goes out.
    pub fn apply(&mut self, patch: VitalsPatch) {
        if patch.is_empty() {
            log::trace!("ignoring empty vitals patch");
            return;
        }

        self.snapshot.apply_patch(patch);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.snapshot);
        }
    }

    /// A borrow of the current snapshot.
    pub fn snapshot(&self) -> &VitalsSnapshot {
        &self.snapshot
    }

    /// A clone of the current snapshot, for consumers that outlive the call.
    pub fn current(&self) -> VitalsSnapshot {
        self.snapshot.clone()
    }

    /// Registers a callback for future merges and returns its handle.
    pub fn subscribe(&mut self, callback: SnapshotCallback) -> SubscriberId {
        let id = SubscriberId::new();
        self.subscribers.push((id, callback));
        log::trace!("subscriber {id} registered");
        id
    }

    /// Removes a subscription; returns whether the handle was still live.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    /// The number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drops every subscription at once; used on session teardown.
    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }
}

impl Default for VitalsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for VitalsAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VitalsAggregator")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn apply_merges_shallowly() {
        let mut aggregator = VitalsAggregator::new();
        aggregator.apply(VitalsPatch::first_contentful_paint(812.0));
        aggregator.apply(VitalsPatch::cumulative_layout_shift(0.04));

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.first_contentful_paint_ms, Some(812.0));
        assert_eq!(snapshot.cumulative_layout_shift, Some(0.04));
        assert_eq!(snapshot.largest_contentful_paint_ms, None);
    }

    #[test]
    fn subscribers_receive_the_full_snapshot_per_merge() {
        let mut aggregator = VitalsAggregator::new();
        let seen: Arc<Mutex<Vec<VitalsSnapshot>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        aggregator.subscribe(Box::new(move |snapshot| {
            sink.lock().unwrap().push(snapshot.clone());
        }));

        aggregator.apply(VitalsPatch::first_contentful_paint(700.0));
        aggregator.apply(VitalsPatch::first_input_delay(18.0));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        // The second notification carries the first merge too.
        assert_eq!(seen[1].first_contentful_paint_ms, Some(700.0));
        assert_eq!(seen[1].first_input_delay_ms, Some(18.0));
    }

    #[test]
    fn unsubscribe_stops_notifications_and_is_exactly_once() {
        let mut aggregator = VitalsAggregator::new();
        let count = Arc::new(Mutex::new(0u32));
        let sink = count.clone();

        let id = aggregator.subscribe(Box::new(move |_| {
            *sink.lock().unwrap() += 1;
        }));

        aggregator.apply(VitalsPatch::first_input_delay(5.0));
        assert!(aggregator.unsubscribe(id));
        aggregator.apply(VitalsPatch::first_input_delay(6.0));

        assert_eq!(*count.lock().unwrap(), 1);
        // The handle is spent.
        assert!(!aggregator.unsubscribe(id));
        assert_eq!(aggregator.subscriber_count(), 0);
    }

    #[test]
    fn empty_patches_do_not_notify() {
        let mut aggregator = VitalsAggregator::new();
        let count = Arc::new(Mutex::new(0u32));
        let sink = count.clone();

        aggregator.subscribe(Box::new(move |_| {
            *sink.lock().unwrap() += 1;
        }));
        aggregator.apply(VitalsPatch::default());

        assert_eq!(*count.lock().unwrap(), 0);
    }
}
