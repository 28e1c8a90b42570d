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

//! # Vigil Collector
//!
//! Page-performance collection built on the `vigil-core` contracts: the four
//! vital observers, the snapshot aggregator, the health-score model, and the
//! session driver that ties them to a host-supplied
//! [`TimingSource`](vigil_core::timing::TimingSource).
//!
//! A typical embedding creates a [`ChannelTimingSource`], starts a
//! [`CollectorSession`] over it with a [`CollectorConfig`], calls
//! [`CollectorSession::tick`] from its update loop, and reads
//! [`CollectorSession::snapshot`] or [`CollectorSession::score`] on demand.

pub mod aggregator;
pub mod config;
pub mod observers;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod source;

pub use aggregator::{SubscriberId, VitalsAggregator};
pub use config::CollectorConfig;
pub use score::{health_score, Rating};
pub use session::CollectorSession;
pub use source::ChannelTimingSource;
