//! Colorful console output for relic searches.
//!
//! Provides a custom `tracing` layer that formats search events with colors,
//! and plain-text rendering of found builds.
//!
//! ## Log Levels
//!
//! - **INFO**: Search start/end
//! - **DEBUG**: Progress updates (at most once per second) and early stops
//! - **TRACE**: Individual accepted builds

mod render;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use render::{render_build, render_build_tree, RenderStyle};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Initializes the search console output.
///
/// Safe to call multiple times - only the first call has effect. The filter
/// defaults to `relicforge_solver=info` and honors `RUST_LOG`.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("relicforge_solver=info,relicforge=info"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

// Marks the start of a search for elapsed time tracking.
fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = u64::try_from(epoch.elapsed().as_nanos()).unwrap_or(u64::MAX);
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = u64::try_from(epoch.elapsed().as_nanos()).unwrap_or(u64::MAX);
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("relicforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    vessel: Option<String>,
    relic_count: Option<u64>,
    candidate_count: Option<u64>,
    vessel_count: Option<u64>,
    count: Option<u64>,
    minimum: Option<i64>,
    duration_ms: Option<u64>,
    builds: Option<u64>,
    best_score: Option<i64>,
    lowest_kept: Option<i64>,
    score: Option<i64>,
    nodes: Option<u64>,
    edges: Option<u64>,
    pruned: Option<u64>,
    classes: Option<u64>,
    terminated_early: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s),
            "vessel" => self.vessel = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        if !self.record_counter(field.name(), value) {
            self.record_signed(field.name(), i64::try_from(value).unwrap_or(i64::MAX));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if !self.record_signed(field.name(), value) {
            if let Ok(value) = u64::try_from(value) {
                self.record_counter(field.name(), value);
            }
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "terminated_early" {
            self.terminated_early = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "vessel" => self.vessel = Some(value.to_string()),
            _ => {}
        }
    }
}

impl EventVisitor {
    fn record_counter(&mut self, name: &str, value: u64) -> bool {
        let slot = match name {
            "relic_count" => &mut self.relic_count,
            "candidate_count" => &mut self.candidate_count,
            "vessel_count" => &mut self.vessel_count,
            "count" => &mut self.count,
            "duration_ms" => &mut self.duration_ms,
            "builds" => &mut self.builds,
            "nodes" => &mut self.nodes,
            "edges" => &mut self.edges,
            "pruned" => &mut self.pruned,
            "classes" => &mut self.classes,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    fn record_signed(&mut self, name: &str, value: i64) -> bool {
        let slot = match name {
            "minimum" => &mut self.minimum,
            "best_score" => &mut self.best_score,
            "lowest_kept" => &mut self.lowest_kept,
            "score" => &mut self.score,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref() {
        Some("search_start") => format_search_start(v),
        Some("search_end") => format_search_end(v),
        Some("parallel_search_start") => format_parallel_start(v),
        Some("progress") => format_progress(v),
        Some("search_terminated") => format_terminated(v),
        Some("build_accepted") => format_build_accepted(v, level),
        Some(_) => String::new(),
        None if level <= Level::WARN => format_warning(v, level),
        None => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let mut output = format!(
        "{} {} Searching │ {} relics │ {} candidates │ {} vessels │ top {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.relic_count).bright_yellow(),
        count(v.candidate_count).bright_yellow(),
        count(v.vessel_count).bright_yellow(),
        count(v.count).bright_magenta(),
    );
    if let Some(minimum) = v.minimum.filter(|&m| m > 0) {
        output.push_str(&format!(" │ minimum {}", minimum.bright_yellow()));
    }
    output
}

fn format_search_end(v: &EventVisitor) -> String {
    let status = if v.terminated_early.unwrap_or(false) {
        "STOPPED EARLY".bright_yellow().bold().to_string()
    } else {
        "COMPLETE".bright_green().bold().to_string()
    };

    format!(
        "{} {} Search {} │ {} │ {} builds │ best {} │ {} nodes │ {} pruned",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.builds).white(),
        format_score(v.best_score),
        count(v.nodes).white(),
        count(v.pruned).bright_magenta(),
    )
}

fn format_parallel_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Searching {} classes in parallel",
        format_elapsed(),
        "▶".bright_blue(),
        count(v.classes).bright_yellow(),
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} {:>12} nodes │ {:>12} edges │ {:>10} pruned │ kept ≥ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.nodes).white(),
        count(v.edges).white(),
        count(v.pruned).bright_magenta(),
        format_score(v.lowest_kept),
    )
}

fn format_terminated(v: &EventVisitor) -> String {
    format!(
        "{} {} Termination reached after {} nodes",
        format_elapsed(),
        "◀".bright_yellow(),
        count(v.nodes).white(),
    )
}

fn format_build_accepted(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} {} │ {}",
        format_elapsed(),
        "✓".bright_green(),
        v.vessel.as_deref().unwrap_or("?").bright_black(),
        format_score(v.score),
    )
}

fn format_warning(v: &EventVisitor, level: Level) -> String {
    let Some(message) = v.message.as_deref() else {
        return String::new();
    };
    let tag = if level == Level::ERROR { "error" } else { "warning" };
    format!(
        "{} {} {}",
        format_elapsed(),
        format!("{tag}:").bright_red().bold(),
        message.yellow()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_score(score: Option<i64>) -> String {
    match score {
        None => "N/A".bright_black().to_string(),
        Some(n) if n < 0 => n.to_formatted_string(&Locale::en).bright_red().to_string(),
        Some(n) if n > 0 => n.to_formatted_string(&Locale::en).bright_green().to_string(),
        Some(n) => n.to_string().white().to_string(),
    }
}
