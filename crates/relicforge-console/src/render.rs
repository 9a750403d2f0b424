//! Text rendering of found builds.

use std::collections::HashSet;
use std::fmt::Display;

use owo_colors::OwoColorize;
use relicforge_core::Relic;
use relicforge_solver::{Build, Slot};

const EMPTY_SLOT: &str = "<Empty Relic Slot>";

/// Output styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Emit ANSI bold/dim sequences.
    pub colored: bool,
}

impl RenderStyle {
    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn colored() -> Self {
        Self { colored: true }
    }

    fn bold(&self, text: impl Display) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: impl Display) -> String {
        if self.colored {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::colored()
    }
}

fn relic_lines(relic: Option<&Relic>, index: usize, style: RenderStyle) -> Vec<String> {
    let Some(relic) = relic else {
        return vec![style.dim(format!("<Unknown Relic #{index}>"))];
    };
    let mut lines = vec![relic.name().to_string()];
    lines.extend(relic.effects().iter().map(|effect| format!("- {effect}")));
    lines.extend(
        relic
            .curses()
            .iter()
            .map(|curse| style.dim(format!("! {curse}"))),
    );
    lines
}

/// Renders one build: a `vessel [score]` header, then every slot's relic
/// with its effects, or the empty-slot marker.
///
/// `relics` is the list the build's slot indices refer to.
pub fn render_build(build: &Build, relics: &[Relic], style: RenderStyle) -> String {
    let mut lines = vec![style.bold(format!("{} [{}]", build.vessel_name, build.score))];
    for slot in &build.slots {
        match *slot {
            Slot::Filled(index) => {
                let relic = relics.get(index);
                let color = relic.map(|r| r.color().to_string()).unwrap_or_default();
                let mut described = relic_lines(relic, index, style).into_iter();
                if let Some(first) = described.next() {
                    lines.push(format!("  {} {}", style.bold(format!("[{color}]")), first));
                }
                lines.extend(described.map(|line| format!("    {line}")));
            }
            Slot::Empty => lines.push(format!("  {}", style.bold(EMPTY_SLOT))),
        }
    }
    lines.join("\n")
}

/// Renders builds grouped by vessel.
///
/// Vessels whose best build scores lower come first, each under a
/// `vessel [min, max]` header. Per slot, the color of the first relic seen
/// is shown once, followed by every distinct relic used in that slot;
/// relics of lower-scoring builds are listed first.
pub fn render_build_tree(builds: &[Build], relics: &[Relic], style: RenderStyle) -> String {
    let mut sorted: Vec<&Build> = builds.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    // vessels in order of their best build
    let mut by_vessel: Vec<(&str, Vec<&Build>)> = Vec::new();
    for build in sorted {
        match by_vessel
            .iter_mut()
            .find(|(name, _)| *name == build.vessel_name)
        {
            Some((_, group)) => group.push(build),
            None => by_vessel.push((build.vessel_name.as_str(), vec![build])),
        }
    }

    let mut lines: Vec<String> = Vec::new();
    for (vessel, group) in by_vessel.iter().rev() {
        let (Some(best), Some(worst)) = (group.first(), group.last()) else {
            continue;
        };
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(style.bold(format!("{vessel} [{}, {}]", worst.score, best.score)));

        let slot_count = best.slots.len();
        for slot in 0..slot_count {
            let mut seen = HashSet::new();
            let mut indices = Vec::new();
            for build in group {
                if let Some(index) = build.slots.get(slot).and_then(|s| s.relic_index()) {
                    if seen.insert(index) {
                        indices.push(index);
                    }
                }
            }

            let Some(&first) = indices.first() else {
                lines.push(format!("  {}", style.bold(EMPTY_SLOT)));
                continue;
            };
            let color = relics
                .get(first)
                .map(|r| r.color().to_string())
                .unwrap_or_default();
            lines.push(format!("  {}", style.bold(format!("[{color}]"))));
            for &index in indices.iter().rev() {
                lines.extend(
                    relic_lines(relics.get(index), index, style)
                        .into_iter()
                        .map(|line| format!("    {line}")),
                );
            }
        }
    }
    lines.join("\n")
}
