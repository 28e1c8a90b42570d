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

//! Generic state-propagation primitives.
//!
//! These helpers are not metrics-specific: any stateful component that needs
//! delayed ([`Debounced`]) or coalesced ([`Batched`]) propagation can use
//! them. Both are host-driven — nothing fires outside the owner's own
//! `poll`/`flush` call, so a timer can never outlive its owner.

pub mod batch;
pub mod debounce;

pub use self::batch::{Batched, Patch, Patchable};
pub use self::debounce::Debounced;
