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

//! Error types shared across the collector.
//!
//! Nothing in this taxonomy is fatal to an embedding application: an
//! unsupported capability degrades a session to partial data, and the
//! configuration variants only surface from the explicit loading paths.

use crate::timing::EntryKind;
use std::fmt::Display;

/// A specialized `Result` type for collector operations.
pub type VitalsResult<T> = Result<T, VitalsError>;

/// An error that can occur within the collector.
#[derive(Debug, Clone)]
pub enum VitalsError {
    /// The timing source cannot deliver entries of the requested kind.
    UnsupportedKind(EntryKind),
    /// Configuration could not be read from or written to disk.
    ConfigIo(String),
    /// Configuration content could not be parsed.
    ConfigParse(String),
}

impl Display for VitalsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VitalsError::UnsupportedKind(kind) => {
                write!(f, "timing source does not support {kind} entries")
            }
            VitalsError::ConfigIo(msg) => write!(f, "config I/O error: {msg}"),
            VitalsError::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for VitalsError {}
