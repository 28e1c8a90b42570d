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

//! First-contentful-paint observation.

use super::VitalObserver;
use std::borrow::Cow;
use vigil_core::timing::{EntryKind, TimingEntry, FIRST_CONTENTFUL_PAINT};
use vigil_core::vitals::VitalsPatch;

/// Watches paint entries for the first-contentful-paint milestone.
///
/// Fires at most once per session: once the milestone has been reported,
/// further paint entries of any name are ignored.
#[derive(Debug, Default)]
pub struct ContentfulPaintObserver {
    reported: bool,
}

impl ContentfulPaintObserver {
    /// Creates the observer in its unfired state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl VitalObserver for ContentfulPaintObserver {
    fn observer_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("vital.fcp")
    }

    fn entry_kind(&self) -> EntryKind {
        EntryKind::Paint
    }

    fn process(&mut self, entries: &[TimingEntry]) -> Vec<VitalsPatch> {
        if self.reported {
            return Vec::new();
        }

        for entry in entries {
            if entry.name.as_deref() == Some(FIRST_CONTENTFUL_PAINT) {
                self.reported = true;
                return vec![VitalsPatch::first_contentful_paint(entry.start_time_ms)];
            }
        }

        Vec::new()
    }
}
