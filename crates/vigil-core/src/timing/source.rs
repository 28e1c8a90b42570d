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

//! The capability contract between a host environment and a session.

use crate::error::{VitalsError, VitalsResult};
use crate::timing::entry::{EntryKind, NavigationRecord, ResourceRecord, TimingEntry};
use std::borrow::Cow;
use std::fmt::Debug;

/// The core trait for a provider of timing data.
///
/// A `TimingSource` is a stateful object owned by the embedding host that
/// knows how to observe one page (or page-like unit). A monitoring session
/// holds one source, probes it per [`EntryKind`], and drains the granted
/// [`EntryStream`]s cooperatively on each tick.
pub trait TimingSource: Send + Sync + Debug {
    /// Returns a unique, human-readable identifier for this source instance.
    fn source_id(&self) -> Cow<'static, str>;

    /// Requests delivery of entries of the given kind.
    ///
    /// Support is probed, not assumed: a source that cannot observe `kind`
    /// answers [`ObserverSupport::Unsupported`] and the caller branches
    /// explicitly. Each successful call grants an independent stream.
    fn observe(&self, kind: EntryKind) -> ObserverSupport;

    /// One-shot query for navigation timing, valid once the document has
    /// fully loaded. Returns `None` before that point or when unavailable.
    fn navigation_timing(&self) -> Option<NavigationRecord>;

    /// One-shot query for all resource timing entries collected so far.
    fn resource_entries(&self) -> Vec<ResourceRecord>;
}

/// Outcome of probing a [`TimingSource`] for one entry kind.
#[derive(Debug)]
pub enum ObserverSupport {
    /// The source supports this kind; entries arrive through the stream.
    Supported(EntryStream),
    /// The source cannot observe this kind in the current environment.
    Unsupported,
}

impl ObserverSupport {
    /// Returns `true` when a stream was granted.
    pub fn is_supported(&self) -> bool {
        matches!(self, ObserverSupport::Supported(_))
    }

    /// Converts into the granted stream, or an [`VitalsError::UnsupportedKind`]
    /// naming the kind that was refused.
    pub fn into_stream(self, kind: EntryKind) -> VitalsResult<EntryStream> {
        match self {
            ObserverSupport::Supported(stream) => Ok(stream),
            ObserverSupport::Unsupported => Err(VitalsError::UnsupportedKind(kind)),
        }
    }
}

/// A drain handle for entries of one kind.
///
/// The stream owns the receiving half of the delivery channel. Dropping it
/// disconnects the channel, which is the release contract: the source
/// prunes the dead sender on its next push, so no explicit unregistration
/// call exists to be forgotten or doubled.
#[derive(Debug)]
pub struct EntryStream {
    kind: EntryKind,
    receiver: flume::Receiver<TimingEntry>,
}

impl EntryStream {
    /// Wraps a receiver as the stream for `kind`.
    pub fn new(kind: EntryKind, receiver: flume::Receiver<TimingEntry>) -> Self {
        Self { kind, receiver }
    }

    /// The entry kind this stream delivers.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Drains every entry delivered since the previous drain.
    ///
    /// Non-blocking; the returned batch preserves delivery order and may be
    /// empty. A disconnected sender simply yields empty batches.
    pub fn drain(&self) -> Vec<TimingEntry> {
        self.receiver.try_iter().collect()
    }

    /// Returns `true` when no entries are waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_delivery_order() {
        let (tx, rx) = flume::unbounded();
        let stream = EntryStream::new(EntryKind::LargestContentfulPaint, rx);

        for start in [1200.0, 800.0, 2000.0] {
            tx.send(TimingEntry::largest_contentful_paint(start))
                .expect("send should succeed");
        }

        let batch = stream.drain();
        let starts: Vec<f64> = batch.iter().map(|e| e.start_time_ms).collect();
        assert_eq!(starts, vec![1200.0, 800.0, 2000.0]);
        assert!(stream.is_empty());
        assert!(stream.drain().is_empty());
    }

    #[test]
    fn drain_after_sender_drop_is_empty_not_an_error() {
        let (tx, rx) = flume::unbounded::<TimingEntry>();
        let stream = EntryStream::new(EntryKind::Paint, rx);
        drop(tx);
        assert!(stream.drain().is_empty());
    }

    #[test]
    fn into_stream_reports_the_refused_kind() {
        let err = ObserverSupport::Unsupported
            .into_stream(EntryKind::FirstInput)
            .unwrap_err();
        match err {
            VitalsError::UnsupportedKind(kind) => assert_eq!(kind, EntryKind::FirstInput),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn supported_probe_converts_to_its_stream() {
        let (_tx, rx) = flume::unbounded();
        let support = ObserverSupport::Supported(EntryStream::new(EntryKind::LayoutShift, rx));
        assert!(support.is_supported());
        let stream = support
            .into_stream(EntryKind::LayoutShift)
            .expect("supported probe should yield its stream");
        assert_eq!(stream.kind(), EntryKind::LayoutShift);
    }
}
