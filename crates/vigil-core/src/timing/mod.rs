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

//! Provides the traits and data structures for host-supplied timing data.
//!
//! A host environment (a browser engine, a webview, a test harness) owns the
//! actual paint/input/layout instrumentation. This module defines the
//! contract through which that environment hands measurements to a
//! monitoring session: discrete [`TimingEntry`] values delivered through a
//! capability-probed [`TimingSource`] subscription, plus two one-shot
//! queries for navigation and resource timing.

pub mod entry;
pub mod source;

pub use self::entry::{
    largest_resources, EntryKind, NavigationRecord, ResourceRecord, TimingEntry,
    FIRST_CONTENTFUL_PAINT, LARGE_RESOURCE_LIMIT, LARGE_RESOURCE_THRESHOLD_BYTES,
};
pub use self::source::{EntryStream, ObserverSupport, TimingSource};
