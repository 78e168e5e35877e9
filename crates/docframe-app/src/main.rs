// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Docframe — live document framing guide.
//
// Entry point. Initialises logging, loads settings, opens the frame source
// and drives one analyze call per tick until the source ends or Ctrl-C.
//
// Usage: `docframe [FRAME_DIR]`. A frame directory given on the command line
// overrides `frame_dir` from the config.

mod services;

use std::path::PathBuf;
use std::time::Duration;

use docframe_bridge::{FrameSource, StillSequence, default_source};
use docframe_core::AppConfig;
use docframe_core::error::Result;
use docframe_detect::FrameAnalyzer;
use tokio::time::MissedTickBehavior;

use services::data_dir;
use services::session::{CaptureSession, TickOutcome};
use services::settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Docframe starting");

    let mut config = settings::load_or_init(&data_dir::data_dir());
    if let Some(dir) = std::env::args().nth(1) {
        config.frame_dir = Some(PathBuf::from(dir));
    }

    if let Err(e) = run(config) {
        tracing::error!(error = %e, "docframe stopped with an error");
        std::process::exit(1);
    }
}

fn run(config: AppConfig) -> Result<()> {
    config.validate()?;
    let analyzer = FrameAnalyzer::new(config.detector.clone())?;

    let source: Box<dyn FrameSource> = match &config.frame_dir {
        Some(dir) => Box::new(StillSequence::from_dir(dir).looping(config.loop_frames)),
        None => default_source(),
    };

    let mut session = CaptureSession::new(source, analyzer, &config.capture_file);
    if let Some(dir) = &config.preview_dir {
        std::fs::create_dir_all(dir)?;
        session = session.with_preview_dir(dir);
    }

    // Ticks are never interleaved: one thread, one analyze call at a time.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(drive(&mut session, &config));
    session.shutdown();
    outcome
}

/// Interval between analyze calls, never shorter than one millisecond.
fn tick_period(frame_rate: u32) -> Duration {
    let millis = 1000 / u64::from(frame_rate.max(1));
    Duration::from_millis(millis.max(1))
}

async fn drive(session: &mut CaptureSession, config: &AppConfig) -> Result<()> {
    session.start()?;

    let mut ticker = tokio::time::interval(tick_period(config.frame_rate));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut captured = false;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let TickOutcome::Analyzed(analysis) = session.tick()? {
                    if analysis.ready && config.auto_capture && !captured {
                        session.capture()?;
                        captured = true;
                    }
                }
                if session.is_finished() {
                    tracing::info!(frames = session.frames_analyzed(), "frame source finished");
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    if !captured {
        tracing::info!(
            path = %session.capture_path().display(),
            "document was never fully framed; nothing captured"
        );
    }
    Ok(())
}
