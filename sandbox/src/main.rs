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

//! Scripted demo: replays a page load against a collector session and
//! prints the resulting snapshot, score, and a debounced score readout.

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use vigil_collector::score::summary_lines;
use vigil_collector::{ChannelTimingSource, CollectorConfig, CollectorSession};
use vigil_core::state::Debounced;
use vigil_core::timing::{NavigationRecord, ResourceRecord, TimingEntry};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let source = Arc::new(ChannelTimingSource::new());
    let mut config = CollectorConfig::default();
    config.log_updates = true;
    config.summary_interval_secs = 0.2;

    let mut session = CollectorSession::start(source.clone(), config.clone());
    session.subscribe(Box::new(|snapshot| {
        log::info!("subscriber saw: {}", snapshot.to_json_string());
    }));

    // A display widget would not want to repaint on every merge; it reads
    // through a debounced score instead.
    let mut displayed_score = Debounced::new(session.score(), config.debounce_window());

    // Replay a page load in three waves, ticking between them the way an
    // embedding host would from its update loop.
    let waves: Vec<Vec<TimingEntry>> = vec![
        vec![
            TimingEntry::paint("first-paint", 610.0),
            TimingEntry::paint("first-contentful-paint", 1260.0),
            TimingEntry::largest_contentful_paint(1260.0),
        ],
        vec![
            TimingEntry::largest_contentful_paint(2890.0),
            TimingEntry::layout_shift(0.04, false),
        ],
        vec![
            TimingEntry::first_input(3200.0, 3235.0),
            TimingEntry::layout_shift(0.02, false),
            TimingEntry::layout_shift(0.21, true),
        ],
    ];

    for wave in waves {
        source.push_batch(wave);
        session.tick();
        displayed_score.set(session.score());
        thread::sleep(Duration::from_millis(100));
    }

    source.set_navigation(NavigationRecord {
        dom_content_loaded_ms: Some(1480.0),
        load_event_ms: Some(2950.0),
        dom_interactive_ms: Some(1330.0),
        response_start_ms: Some(260.0),
    });
    source.set_resources(vec![
        ResourceRecord {
            name: "app.css".into(),
            transfer_size_bytes: 48_000,
            duration_ms: 31.0,
        },
        ResourceRecord {
            name: "vendor.js".into(),
            transfer_size_bytes: 412_000,
            duration_ms: 205.0,
        },
        ResourceRecord {
            name: "editor-chunk.js".into(),
            transfer_size_bytes: 188_000,
            duration_ms: 96.0,
        },
    ]);
    session.document_loaded();
    session.tick();

    // Let the debounce window elapse so the displayed score settles.
    displayed_score.set(session.score());
    thread::sleep(config.debounce_window() + Duration::from_millis(50));
    displayed_score.poll();

    println!("snapshot: {}", session.snapshot().to_json_string());
    for line in summary_lines(&session.snapshot()) {
        println!("  {line}");
    }
    println!("health score: {}", session.score());
    println!("displayed (debounced) score: {}", displayed_score.value());

    session.close();
    Ok(())
}
