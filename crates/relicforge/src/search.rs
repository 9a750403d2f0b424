//! Search entry points that hide the finder wiring.

use relicforge_config::{ConfigError, SearchConfig, VesselCatalog};
use relicforge_core::{Relic, Result, ScoreTable, VesselTree};
use relicforge_solver::{
    search_classes_parallel, BuildFinder, NeverTermination, NoopListener, SearchListener,
    SearchResult, Termination,
};
use tracing::debug;

/// Finds the best builds for `tree` as configured by `config`.
pub fn run_search(
    relics: &[Relic],
    table: &ScoreTable,
    tree: &VesselTree,
    config: &SearchConfig,
) -> Result<SearchResult> {
    run_search_with(relics, table, tree, config, &NoopListener, &NeverTermination)
}

/// [`run_search`] with a progress listener and an extra stop condition.
///
/// `termination` is combined with the limits in `config`; whichever fires
/// first ends the search.
pub fn run_search_with<L, T>(
    relics: &[Relic],
    table: &ScoreTable,
    tree: &VesselTree,
    config: &SearchConfig,
    listener: &L,
    termination: &T,
) -> Result<SearchResult>
where
    L: SearchListener,
    T: Termination,
{
    #[cfg(feature = "console")]
    relicforge_console::init();

    validate_relics(relics)?;
    let finder = BuildFinder::from_config(relics, table, config)?;
    finder.run(tree, config, listener, termination)
}

/// Searches the vessels `catalog` offers to `class`.
pub fn search_class(
    relics: &[Relic],
    table: &ScoreTable,
    catalog: &VesselCatalog,
    class: &str,
    config: &SearchConfig,
) -> Result<SearchResult> {
    let tree = catalog.tree_for(class)?;
    debug!(class = class, vessels = tree.vessel_count(), "Searching class");
    run_search(relics, table, &tree, config)
}

/// Searches every class of `catalog` in parallel, in class-name order.
pub fn search_all_classes(
    relics: &[Relic],
    table: &ScoreTable,
    catalog: &VesselCatalog,
    config: &SearchConfig,
) -> Result<Vec<(String, SearchResult)>> {
    #[cfg(feature = "console")]
    relicforge_console::init();

    validate_relics(relics)?;
    let trees = catalog
        .classes()
        .into_iter()
        .map(|class| catalog.tree_for(&class).map(|tree| (class, tree)))
        .collect::<std::result::Result<Vec<_>, ConfigError>>()?;
    let named: Vec<(&str, &VesselTree)> = trees
        .iter()
        .map(|(class, tree)| (class.as_str(), tree))
        .collect();

    let finder = BuildFinder::from_config(relics, table, config)?;
    search_classes_parallel(&finder, &named, config, &NoopListener, &NeverTermination)
}

// Incomplete relics never reach the search, so only complete ones must be
// well-formed.
fn validate_relics(relics: &[Relic]) -> Result<()> {
    relics
        .iter()
        .filter(|relic| relic.is_complete())
        .try_for_each(Relic::validate)
}
