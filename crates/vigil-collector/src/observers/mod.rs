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

//! The four vital observers.
//!
//! Each observer consumes drained batches of raw entries of exactly one
//! [`EntryKind`] and emits zero or more snapshot patches. They are stateless
//! except where their metric demands memory: first-contentful-paint fires
//! once per session, and cumulative layout shift carries its running
//! accumulator.

mod contentful_paint;
mod input_delay;
mod largest_paint;
mod layout_shift;

pub use self::contentful_paint::ContentfulPaintObserver;
pub use self::input_delay::InputDelayObserver;
pub use self::largest_paint::LargestPaintObserver;
pub use self::layout_shift::LayoutShiftObserver;

use std::borrow::Cow;
use std::fmt::Debug;
use vigil_core::timing::{EntryKind, TimingEntry};
use vigil_core::vitals::VitalsPatch;

/// The contract every metric observer implements.
///
/// An observer consumes one drained batch at a time and produces the patches
/// that batch implies. Entries missing a field the observer needs are
/// skipped silently; an observer never fails.
pub trait VitalObserver: Debug + Send {
    /// Returns a unique, human-readable identifier for this observer.
    fn observer_id(&self) -> Cow<'static, str>;

    /// The entry kind this observer consumes.
    fn entry_kind(&self) -> EntryKind;

    /// Maps one drained batch to the partial updates it implies, in order.
    fn process(&mut self, entries: &[TimingEntry]) -> Vec<VitalsPatch>;
}

/// Constructs the standard observer set, one per observable kind.
pub fn standard_observers() -> Vec<Box<dyn VitalObserver>> {
    vec![
        Box::new(ContentfulPaintObserver::new()),
        Box::new(LargestPaintObserver::new()),
        Box::new(InputDelayObserver::new()),
        Box::new(LayoutShiftObserver::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_covers_every_kind_once() {
        let observers = standard_observers();
        let mut kinds: Vec<EntryKind> = observers.iter().map(|o| o.entry_kind()).collect();
        kinds.sort_by_key(|k| k.as_str());
        let mut expected = EntryKind::ALL.to_vec();
        expected.sort_by_key(|k| k.as_str());
        assert_eq!(kinds, expected);
    }
}
