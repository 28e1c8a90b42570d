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

//! The per-session vitals data model.
//!
//! One [`VitalsSnapshot`] accumulates for the life of a monitoring session
//! and is discarded with it; there is no persistence. Observers never write
//! the snapshot directly — they emit [`VitalsPatch`] partial updates that
//! the aggregator merges shallowly, one field family per observer.

pub mod snapshot;

pub use self::snapshot::{VitalsPatch, VitalsSnapshot};
