//! AlarmPanel simulator - Main Entry Point
//!
//! Drives the security core from a line-based script on stdin.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  InMemoryStore      ScriptedClassifier     LogObserver   │
//! │  (SecurityStore)    (ImageClassifier)      (Observer)    │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          SecurityService (pure logic)          │      │
//! │  │   arming rules · alarm escalation · fan-out    │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `panel-sim [config.json] < script.txt`
//!
//! Besides the [`PanelCommand`] syntax the script accepts `verdict <score>`,
//! which queues a confidence score (percent) for the next `image`
//! command, and `status`, which logs the current panel state.  Blank
//! lines and lines starting with `#` are skipped.
#![deny(unused_must_use)]

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::{error, info, warn};
use tracing_subscriber::EnvFilter;

use alarmpanel::adapters::classifier::ScriptedClassifier;
use alarmpanel::adapters::log_sink::LogObserver;
use alarmpanel::adapters::memory_store::InMemoryStore;
use alarmpanel::{PanelCommand, PanelConfig, SecurityService};

type Panel = SecurityService<InMemoryStore, ScriptedClassifier>;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("AlarmPanel simulator v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file argument or defaults) ─────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let cfg = PanelConfig::from_json(&raw).with_context(|| format!("parsing {path}"))?;
            info!("Config loaded from {}", path);
            cfg
        }
        None => PanelConfig::default(),
    };

    // ── 3. Construct adapters and service ─────────────────────
    let mut panel = SecurityService::new(InMemoryStore::new(), ScriptedClassifier::new(), config)
        .context("building security service")?;
    panel.add_observer(Arc::new(LogObserver::new()));

    // ── 4. Script loop ────────────────────────────────────────
    let stdin = io::stdin();
    let mut failures = 0usize;
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        let lineno = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Err(e) = run_line(&mut panel, trimmed) {
            failures += 1;
            error!("line {}: {:#}", lineno, e);
        }
    }

    log_status(&panel)?;
    if failures > 0 {
        bail!("{failures} script line(s) failed");
    }
    Ok(())
}

fn run_line(panel: &mut Panel, line: &str) -> Result<()> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("verdict") => {
            let score: f32 = words
                .next()
                .context("verdict needs a score")?
                .parse()
                .context("verdict score must be a number")?;
            if words.next().is_some() {
                warn!("ignoring trailing input after verdict");
            }
            panel.classifier_mut().push_confidence(score);
            Ok(())
        }
        Some("status") => log_status(panel),
        _ => {
            let cmd: PanelCommand = line.parse()?;
            panel.handle_command(cmd)?;
            Ok(())
        }
    }
}

fn log_status(panel: &Panel) -> Result<()> {
    let sensors = panel.sensors()?;
    let active = sensors.iter().filter(|s| s.is_active()).count();
    info!(
        "STATUS | arming={} alarm={} cat={} sensors={} active={}",
        panel.arming_status()?,
        panel.alarm_status()?,
        panel.cat_present(),
        sensors.len(),
        active
    );
    Ok(())
}
