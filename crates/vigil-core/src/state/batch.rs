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

//! Next-tick coalescing of partial-object updates.

/// A partial update that composes with later partials of the same type.
///
/// Composition is field-wise last-write-wins: merging `{a:1}` then `{a:3, b:2}`
/// leaves `{a:3, b:2}`.
pub trait Patch: Sized {
    /// Folds `newer` into `self`, newer fields winning.
    fn merge(&mut self, newer: Self);
}

/// A state type that can absorb its associated [`Patch`].
pub trait Patchable {
    /// The partial-update type for this state.
    type Patch: Patch;

    /// Applies a patch as a shallow merge: fields present in the patch
    /// overwrite the corresponding state field, absent fields are untouched.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Coalesces partial updates submitted within one scheduling turn.
///
/// `queue` merges each partial into a pending accumulator; the owner calls
/// [`flush`](Batched::flush) on its next tick to commit the accumulated
/// patch in a single state change. Dropping the value (or calling
/// [`cancel`](Batched::cancel)) discards pending work, so a flush can never
/// land after teardown.
///
/// State machine: Idle → Pending on first `queue`, back to Idle on `flush`;
/// queueing while pending extends the accumulator.
#[derive(Debug)]
pub struct Batched<S: Patchable> {
    committed: S,
    pending: Option<S::Patch>,
}

impl<S: Patchable> Batched<S> {
    /// Creates a batcher around an initial committed state.
    pub fn new(initial: S) -> Self {
        Self {
            committed: initial,
            pending: None,
        }
    }

    /// Merges a partial update into the pending accumulator.
    pub fn queue(&mut self, patch: S::Patch) {
        match self.pending.as_mut() {
            Some(pending) => pending.merge(patch),
            None => self.pending = Some(patch),
        }
    }

    /// Commits the accumulator into the state.
    ///
    /// Returns `true` when pending work was applied, `false` on an idle
    /// flush.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(patch) => {
                self.committed.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Discards any pending accumulator without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns `true` while an accumulator awaits its flush.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The committed state, excluding anything still pending.
    pub fn committed(&self) -> &S {
        &self.committed
    }

    /// Consumes the batcher, returning the committed state. Pending work is
    /// discarded.
    pub fn into_inner(self) -> S {
        self.committed
    }
}
