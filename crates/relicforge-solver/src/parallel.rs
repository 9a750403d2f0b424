//! Independent searches over several vessel trees on the rayon pool.

use rayon::prelude::*;
use relicforge_config::SearchConfig;
use relicforge_core::{Result, VesselTree};
use tracing::info;

use crate::finder::{BuildFinder, SearchResult};
use crate::listener::SearchListener;
use crate::termination::Termination;

/// Runs [`BuildFinder::run`] for every `(class, tree)` pair in parallel.
///
/// Each search owns its used flags, scorer and heap; the finder's relics,
/// score table and candidates are shared read-only. Results keep the order
/// of `trees`. The first failing search fails the whole call.
pub fn search_classes_parallel<L, T>(
    finder: &BuildFinder<'_>,
    trees: &[(&str, &VesselTree)],
    config: &SearchConfig,
    listener: &L,
    termination: &T,
) -> Result<Vec<(String, SearchResult)>>
where
    L: SearchListener + Sync,
    T: Termination,
{
    info!(event = "parallel_search_start", classes = trees.len());
    trees
        .par_iter()
        .map(|&(class, tree)| {
            finder
                .run(tree, config, listener, termination)
                .map(|result| (class.to_string(), result))
        })
        .collect()
}
