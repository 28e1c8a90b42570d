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

//! Delayed value propagation with a sliding window.

use std::time::{Duration, Instant};

/// A value pair — immediate and settled — with debounced propagation.
///
/// Every [`set`](Debounced::set) replaces the immediate value and re-arms a
/// deadline one window into the future. When the owner's
/// [`poll`](Debounced::poll) observes that the deadline has passed without a
/// newer update, the settled value catches up to the immediate value; rapid
/// updates inside the window therefore coalesce to whichever value was
/// current when the window finally elapsed.
///
/// The deadline is owned state, not a registered callback: it fires only
/// inside `poll`, and [`cancel`](Debounced::cancel) (or dropping the value)
/// disarms it, so a stale fire after teardown cannot happen.
#[derive(Debug, Clone)]
pub struct Debounced<T: Clone> {
    immediate: T,
    settled: T,
    window: Duration,
    deadline: Option<Instant>,
}

impl<T: Clone> Debounced<T> {
    /// Creates a debounced value; both the immediate and settled values
    /// start at `initial` and no deadline is armed.
    pub fn new(initial: T, window: Duration) -> Self {
        Self {
            immediate: initial.clone(),
            settled: initial,
            window,
            deadline: None,
        }
    }

    /// Replaces the immediate value and (re)arms the window.
    pub fn set(&mut self, value: T) {
        self.immediate = value;
        self.deadline = Some(Instant::now() + self.window);
    }

    /// The latest value, updated on every `set`.
    pub fn latest(&self) -> &T {
        &self.immediate
    }

    /// The settled value, updated only when a window elapses quietly.
    pub fn value(&self) -> &T {
        &self.settled
    }

    /// The configured window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` while a deadline is armed.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Polls against the real clock. See [`poll_at`](Debounced::poll_at).
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Settles the value if the armed deadline lies at or before `now`.
    ///
    /// Returns `true` when the settled value changed hands on this call.
    /// Taking `now` explicitly keeps the primitive deterministic under test
    /// and lets a host drive many debounced values off one clock read.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.settled = self.immediate.clone();
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarms any pending deadline; the settled value keeps its last state.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
