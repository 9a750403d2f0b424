//! Branch-and-bound search for the best relic builds.

use std::time::Instant;

use relicforge_config::SearchConfig;
use relicforge_core::{RelicForgeError, Relic, Result, ScoreTable, VesselTree};
use relicforge_scoring::{IncrementalScorer, ScoreDirector};
use tracing::{debug, info, trace, warn};

use crate::bound::{NoBounder, PathBounder, ScoreBounder};
use crate::build::{Build, Slot, Slots};
use crate::candidates::CandidatePool;
use crate::collector::BuildHeap;
use crate::listener::{NoopListener, SearchListener};
use crate::stats::SearchStats;
use crate::termination::{
    NeverTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};

/// How many builds to keep and the lowest score worth keeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub count: usize,
    pub minimum: i64,
}

impl SearchLimits {
    pub fn new(count: usize, minimum: i64) -> Self {
        Self { count, minimum }
    }

    fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(RelicForgeError::Config(
                "result count must be positive".to_string(),
            ));
        }
        if self.minimum < 0 {
            return Err(RelicForgeError::Config(format!(
                "minimum score must not be negative, got {}",
                self.minimum
            )));
        }
        Ok(())
    }
}

impl From<&SearchConfig> for SearchLimits {
    fn from(config: &SearchConfig) -> Self {
        Self::new(config.count, config.minimum)
    }
}

/// Builds found by one search, best first, and the run's counters.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub builds: Vec<Build>,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn best_score(&self) -> Option<i64> {
        self.builds.first().map(|build| build.score)
    }

    /// The builds, or [`RelicForgeError::Cancelled`] if a termination
    /// condition cut the search short.
    pub fn complete_builds(self) -> Result<Vec<Build>> {
        if self.stats.terminated_early {
            return Err(RelicForgeError::Cancelled);
        }
        Ok(self.builds)
    }
}

/// Finds the highest-scoring relic builds for a vessel tree.
///
/// The relic list and score table are borrowed read-only; a finder may be
/// shared by concurrent searches over different trees. Relics that are
/// incomplete or score below the prune threshold on their own are dropped
/// once, at construction.
///
/// # Example
///
/// ```
/// use relicforge_core::{Color, Effect, Relic, ScoreTable, SlotRequirement, VesselTree};
/// use relicforge_solver::{BuildFinder, Slot};
///
/// let vigor = || vec![Effect::new("Vigor", 0).with_stackable(true)];
/// let relics = vec![
///     Relic::new("A", Color::Red, vigor()),
///     Relic::new("B", Color::Red, vigor()),
///     Relic::new("C", Color::Blue, vigor()),
/// ];
/// let table: ScoreTable = [("vigor", 10)].into_iter().collect();
/// let tree = VesselTree::from_patterns([(
///     "Vigor Vessel",
///     [
///         SlotRequirement::Color(Color::Red),
///         SlotRequirement::Color(Color::Blue),
///         SlotRequirement::Any,
///     ],
/// )]);
///
/// let finder = BuildFinder::new(&relics, &table, 1).unwrap();
/// let builds = finder.top_builds(&tree, 5, 0).unwrap();
///
/// assert_eq!(builds.len(), 1);
/// assert_eq!(builds[0].score, 30);
/// assert_eq!(
///     builds[0].slots.as_slice(),
///     &[Slot::Filled(0), Slot::Filled(2), Slot::Filled(1)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BuildFinder<'a> {
    relics: &'a [Relic],
    table: &'a ScoreTable,
    pool: CandidatePool,
}

impl<'a> BuildFinder<'a> {
    /// Pre-filters `relics` against `table`, keeping those scoring at least
    /// `prune` on their own.
    pub fn new(relics: &'a [Relic], table: &'a ScoreTable, prune: i64) -> Result<Self> {
        if prune < 0 {
            return Err(RelicForgeError::Config(format!(
                "prune threshold must not be negative, got {prune}"
            )));
        }
        Ok(Self {
            relics,
            table,
            pool: CandidatePool::new(relics, table, prune),
        })
    }

    /// Validates `config` and pre-filters with its prune threshold.
    pub fn from_config(
        relics: &'a [Relic],
        table: &'a ScoreTable,
        config: &SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Self::new(relics, table, config.prune)
    }

    pub fn relics(&self) -> &'a [Relic] {
        self.relics
    }

    pub fn score_table(&self) -> &'a ScoreTable {
        self.table
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Number of relics that survived pre-filtering.
    pub fn candidate_count(&self) -> usize {
        self.pool.len()
    }

    /// Up to `count` distinct builds scoring at least `minimum`, best first.
    pub fn top_builds(&self, tree: &VesselTree, count: usize, minimum: i64) -> Result<Vec<Build>> {
        self.search(
            tree,
            SearchLimits::new(count, minimum),
            &PathBounder,
            &NoopListener,
            &NeverTermination,
        )
        .map(|result| result.builds)
    }

    /// Runs a search as described by `config`.
    ///
    /// Pruning follows `enable_pruning`, and the configured time and node
    /// limits are combined with `termination`. The prune threshold is the
    /// one this finder was built with.
    pub fn run<L, T>(
        &self,
        tree: &VesselTree,
        config: &SearchConfig,
        listener: &L,
        termination: &T,
    ) -> Result<SearchResult>
    where
        L: SearchListener,
        T: Termination,
    {
        config.validate()?;
        let termination = OrTermination((
            config.time_limit().map(TimeTermination::new),
            config.node_count_limit().map(NodeCountTermination::new),
            termination,
        ));
        let limits = SearchLimits::from(config);
        if config.enable_pruning {
            self.search(tree, limits, &PathBounder, listener, &termination)
        } else {
            self.search(tree, limits, &NoBounder, listener, &termination)
        }
    }

    /// Depth-first branch-and-bound over `tree`.
    pub fn search<B, L, T>(
        &self,
        tree: &VesselTree,
        limits: SearchLimits,
        bounder: &B,
        listener: &L,
        termination: &T,
    ) -> Result<SearchResult>
    where
        B: ScoreBounder,
        L: SearchListener,
        T: Termination,
    {
        limits.validate()?;

        info!(
            event = "search_start",
            relic_count = self.relics.len(),
            candidate_count = self.pool.len(),
            vessel_count = tree.vessel_count(),
            count = limits.count,
            minimum = limits.minimum,
        );

        let mut run = SearchRun {
            relics: self.relics,
            pool: &self.pool,
            limits,
            bounder,
            listener,
            termination,
            used: vec![false; self.pool.len()],
            slots: Slots::new(),
            scorer: IncrementalScorer::new(self.table),
            heap: BuildHeap::new(limits.count),
            stats: SearchStats::default(),
            stopped: false,
            last_progress: Instant::now(),
        };
        run.stats.start();

        let root_bound = bounder.optimistic_bound(tree, &self.pool, &run.used);
        if root_bound.is_some() && self.table.has_negative_scores() {
            warn!("Score table has negative entries; pruning may drop valid builds");
        }

        if run.within_bound(tree) {
            run.visit(tree);
        } else {
            run.stats.record_prune();
        }

        run.stats.finish();
        let SearchRun { heap, stats, .. } = run;
        let builds = heap.into_results_desc();

        info!(
            event = "search_end",
            duration_ms = stats.elapsed_ms,
            builds = builds.len(),
            best_score = builds.first().map(|build| build.score),
            nodes = stats.nodes_visited,
            pruned = stats.subtrees_pruned,
            terminated_early = stats.terminated_early,
        );

        Ok(SearchResult { builds, stats })
    }
}

/// State of one search call: used flags, path, scorer and heap.
struct SearchRun<'s, 'a, B, L, T> {
    relics: &'a [Relic],
    pool: &'s CandidatePool,
    limits: SearchLimits,
    bounder: &'s B,
    listener: &'s L,
    termination: &'s T,
    used: Vec<bool>,
    slots: Slots,
    scorer: IncrementalScorer<'a>,
    heap: BuildHeap,
    stats: SearchStats,
    stopped: bool,
    last_progress: Instant,
}

impl<B, L, T> SearchRun<'_, '_, B, L, T>
where
    B: ScoreBounder,
    L: SearchListener,
    T: Termination,
{
    /// Whether the best completion below `node` could still enter the heap.
    fn within_bound(&self, node: &VesselTree) -> bool {
        let Some(bound) = self.bounder.optimistic_bound(node, self.pool, &self.used) else {
            return true;
        };
        let best = self.scorer.current_score().saturating_add(bound);
        if best < self.limits.minimum {
            return false;
        }
        // a full heap only takes a strictly higher score than its minimum
        match self.heap.min_score() {
            Some(min) if self.heap.is_full() => best > min,
            _ => true,
        }
    }

    fn visit(&mut self, node: &VesselTree) {
        if self.stopped {
            return;
        }
        if self.termination.is_terminated(&self.stats) {
            self.stopped = true;
            self.stats.terminated_early = true;
            debug!(event = "search_terminated", nodes = self.stats.nodes_visited);
            return;
        }
        self.stats.record_node();
        self.log_progress();

        if let Some(name) = node.name() {
            self.offer(name);
        }
        if node.is_leaf() {
            return;
        }

        let relics = self.relics;
        let pool = self.pool;
        for (requirement, child) in node.children() {
            self.listener.on_edge_visited();
            self.stats.record_edge();

            let mut filled = false;
            for &position in pool.for_requirement(requirement) {
                if self.used[position] {
                    continue;
                }
                filled = true;
                let index = pool.candidate(position).index;

                let checkpoint = self.scorer.push_context();
                self.used[position] = true;
                self.slots.push(Slot::Filled(index));
                self.scorer.push_relic(&relics[index]);

                self.descend(child);

                self.slots.pop();
                self.used[position] = false;
                self.scorer.pop_context(checkpoint);

                if self.stopped {
                    return;
                }
            }

            if !filled && requirement.is_wildcard() {
                self.slots.push(Slot::Empty);
                self.descend(child);
                self.slots.pop();
            }
            if self.stopped {
                return;
            }
        }
    }

    fn descend(&mut self, child: &VesselTree) {
        if self.within_bound(child) {
            self.visit(child);
        } else {
            self.stats.record_prune();
        }
    }

    fn offer(&mut self, vessel: &str) {
        let score = self.scorer.current_score();
        if score < self.limits.minimum || !self.heap.would_accept(score) {
            return;
        }
        let build = Build {
            vessel_name: vessel.to_string(),
            slots: self.slots.clone(),
            score,
            active_effects: self
                .scorer
                .active_effects()
                .iter()
                .map(|&effect| effect.clone())
                .collect(),
        };
        let accepted = self.heap.consider(build);
        self.stats.record_build(accepted);
        if accepted {
            self.listener.on_build_accepted(vessel, score);
            trace!(event = "build_accepted", vessel = vessel, score = score);
        }
    }

    fn log_progress(&mut self) {
        if self.stats.nodes_visited % 4096 != 0 {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_progress).as_secs() >= 1 {
            debug!(
                event = "progress",
                nodes = self.stats.nodes_visited,
                edges = self.stats.edges_visited,
                pruned = self.stats.subtrees_pruned,
                lowest_kept = self.heap.min_score(),
            );
            self.last_progress = now;
        }
    }
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
