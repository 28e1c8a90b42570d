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

//! The health-score model.
//!
//! A snapshot maps to an integer score in `[0, 100]`: start at 100 and apply
//! one deduction per observed metric, chosen from a two-tier threshold
//! table. Unset metrics deduct nothing, so a partial snapshot simply scores
//! with lower confidence rather than failing.

use std::fmt::Display;
use vigil_core::vitals::VitalsSnapshot;

/// First-contentful-paint threshold (ms) above which the rating degrades.
pub const FCP_NEEDS_IMPROVEMENT_MS: f64 = 1000.0;
/// First-contentful-paint threshold (ms) above which the rating is poor.
pub const FCP_POOR_MS: f64 = 1800.0;
/// Largest-contentful-paint threshold (ms) above which the rating degrades.
pub const LCP_NEEDS_IMPROVEMENT_MS: f64 = 2500.0;
/// Largest-contentful-paint threshold (ms) above which the rating is poor.
pub const LCP_POOR_MS: f64 = 4000.0;
/// First-input-delay threshold (ms) above which the rating degrades.
pub const FID_NEEDS_IMPROVEMENT_MS: f64 = 100.0;
/// First-input-delay threshold (ms) above which the rating is poor.
pub const FID_POOR_MS: f64 = 300.0;
/// Layout-shift threshold above which the rating degrades.
pub const CLS_NEEDS_IMPROVEMENT: f64 = 0.1;
/// Layout-shift threshold above which the rating is poor.
pub const CLS_POOR: f64 = 0.25;

/// Quality tier for one metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// At or below the needs-improvement threshold.
    Good,
    /// Above the needs-improvement threshold, at or below poor.
    NeedsImprovement,
    /// Above the poor threshold.
    Poor,
}

impl Rating {
    /// A short human-readable label for log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn rate(value: f64, needs_improvement: f64, poor: f64) -> Rating {
    if value > poor {
        Rating::Poor
    } else if value > needs_improvement {
        Rating::NeedsImprovement
    } else {
        Rating::Good
    }
}

/// Rates a first-contentful-paint value in milliseconds.
pub fn fcp_rating(ms: f64) -> Rating {
    rate(ms, FCP_NEEDS_IMPROVEMENT_MS, FCP_POOR_MS)
}

/// Rates a largest-contentful-paint value in milliseconds.
pub fn lcp_rating(ms: f64) -> Rating {
    rate(ms, LCP_NEEDS_IMPROVEMENT_MS, LCP_POOR_MS)
}

/// Rates a first-input-delay value in milliseconds.
pub fn fid_rating(ms: f64) -> Rating {
    rate(ms, FID_NEEDS_IMPROVEMENT_MS, FID_POOR_MS)
}

/// Rates a cumulative-layout-shift total.
pub fn cls_rating(total: f64) -> Rating {
    rate(total, CLS_NEEDS_IMPROVEMENT, CLS_POOR)
}

fn deduction(rating: Rating, needs_improvement_penalty: u32, poor_penalty: u32) -> u32 {
    match rating {
        Rating::Good => 0,
        Rating::NeedsImprovement => needs_improvement_penalty,
        Rating::Poor => poor_penalty,
    }
}

/// Computes the health score for a snapshot.
///
/// Exactly one tier applies per metric (the poor tier wins outright, it is
/// never stacked on the lower tier) and the result never goes below zero.
pub fn health_score(snapshot: &VitalsSnapshot) -> u8 {
    let mut deductions: u32 = 0;

    if let Some(ms) = snapshot.first_contentful_paint_ms {
        deductions += deduction(fcp_rating(ms), 5, 15);
    }
    if let Some(ms) = snapshot.largest_contentful_paint_ms {
        deductions += deduction(lcp_rating(ms), 10, 20);
    }
    if let Some(ms) = snapshot.first_input_delay_ms {
        deductions += deduction(fid_rating(ms), 5, 15);
    }
    if let Some(total) = snapshot.cumulative_layout_shift {
        deductions += deduction(cls_rating(total), 10, 20);
    }

    100u32.saturating_sub(deductions) as u8
}

/// Renders one line per observed metric for the periodic summary log.
pub fn summary_lines(snapshot: &VitalsSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(ms) = snapshot.first_contentful_paint_ms {
        lines.push(format!("first contentful paint: {ms:.1}ms ({})", fcp_rating(ms)));
    }
    if let Some(ms) = snapshot.largest_contentful_paint_ms {
        lines.push(format!("largest contentful paint: {ms:.1}ms ({})", lcp_rating(ms)));
    }
    if let Some(ms) = snapshot.first_input_delay_ms {
        lines.push(format!("first input delay: {ms:.1}ms ({})", fid_rating(ms)));
    }
    if let Some(total) = snapshot.cumulative_layout_shift {
        lines.push(format!("cumulative layout shift: {total:.3} ({})", cls_rating(total)));
    }
    if let Some(nav) = &snapshot.navigation {
        if let Some(load) = nav.load_event_ms {
            lines.push(format!("load event: {load:.1}ms"));
        }
    }
    if !snapshot.large_resources.is_empty() {
        lines.push(format!("large resources: {}", snapshot.large_resources.len()));
    }

    lines
}
