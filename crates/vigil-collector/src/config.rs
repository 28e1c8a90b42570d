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

//! Session configuration supplied by the embedding component.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vigil_core::{VitalsError, VitalsResult};

/// Options recognized by a collector session.
///
/// Unknown JSON keys are ignored rather than rejected, so embedders can
/// share one config file across components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Mirror each applied update to the diagnostic log.
    pub log_updates: bool,
    /// Enable the resource-timing query path.
    pub resource_timing: bool,
    /// Seconds between periodic summary log blocks; `0` disables them.
    pub summary_interval_secs: f64,
    /// Window, in milliseconds, for debounced values built from this config.
    pub debounce_window_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            log_updates: false,
            resource_timing: true,
            summary_interval_secs: 10.0,
            debounce_window_ms: 300,
        }
    }
}

impl CollectorConfig {
    /// Loads configuration from a JSON string.
    pub fn from_json(json: &str) -> VitalsResult<Self> {
        serde_json::from_str(json).map_err(|e| VitalsError::ConfigParse(e.to_string()))
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: &str) -> VitalsResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| VitalsError::ConfigIo(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Saves configuration to a JSON file.
    pub fn to_file(&self, path: &str) -> VitalsResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| VitalsError::ConfigParse(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| VitalsError::ConfigIo(e.to_string()))
    }

    /// The summary cadence as a [`Duration`].
    pub fn summary_interval(&self) -> Duration {
        Duration::from_secs_f64(self.summary_interval_secs.max(0.0))
    }

    /// The debounce window as a [`Duration`].
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }
}
