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

//! # Vigil Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the collector's architecture.
//!
//! This crate defines the "common language" of the system: timing entries and
//! the [`timing::TimingSource`] capability contract supplied by a host
//! environment, the [`vitals::VitalsSnapshot`] data model accumulated per
//! monitoring session, and the generic state-propagation primitives in
//! [`state`]. The `vigil-collector` crate builds the observers, aggregation,
//! and scoring on top of these contracts.

#![warn(missing_docs)]

pub mod error;
pub mod state;
pub mod timing;
pub mod utils;
pub mod vitals;

pub use error::{VitalsError, VitalsResult};
pub use utils::timer::Stopwatch;
