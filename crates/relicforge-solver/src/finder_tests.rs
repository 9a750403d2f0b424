//! Tests for the branch-and-bound build search.

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;

use relicforge_core::{Color, Effect, Relic, ScoreTable, SlotRequirement, VesselTree};
use relicforge_scoring::score_effects;
use relicforge_test::{relic, vigor_scenario, RandomPool};

use super::*;
use crate::build::BuildSignature;
use crate::listener::CountingListener;
use crate::termination::ExternalTermination;

fn tree_of(patterns: &[(&str, &[SlotRequirement])]) -> VesselTree {
    VesselTree::from_patterns(patterns.iter().map(|(name, slots)| (*name, *slots)))
}

const RED: SlotRequirement = SlotRequirement::Color(Color::Red);
const BLUE: SlotRequirement = SlotRequirement::Color(Color::Blue);
const DEEP_RED: SlotRequirement = SlotRequirement::Color(Color::DeepRed);
const ANY: SlotRequirement = SlotRequirement::Any;

fn vigor(name: &str, color: Color) -> Relic {
    relic(name, color, vec![Effect::new("Vigor", 0)])
}

fn vigor_table() -> ScoreTable {
    [("vigor", 10)].into_iter().collect()
}

fn signatures(builds: &[Build]) -> HashSet<BuildSignature> {
    builds.iter().map(Build::signature).collect()
}

/// Every assignment of distinct candidates to every vessel's slots, scored
/// from scratch.
fn brute_force(
    relics: &[Relic],
    table: &ScoreTable,
    tree: &VesselTree,
    prune: i64,
    minimum: i64,
) -> HashSet<BuildSignature> {
    let candidates: Vec<usize> = (0..relics.len())
        .filter(|&i| {
            relics[i].is_complete()
                && score_effects(relics[i].effects_and_curses(), table).score >= prune
        })
        .collect();

    let mut out = HashSet::new();
    for (name, pattern) in tree.patterns() {
        let mut used = vec![false; relics.len()];
        let mut slots = Slots::new();
        enumerate(
            relics, table, &candidates, &name, &pattern, minimum, &mut used, &mut slots, &mut out,
        );
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn enumerate(
    relics: &[Relic],
    table: &ScoreTable,
    candidates: &[usize],
    name: &str,
    pattern: &[SlotRequirement],
    minimum: i64,
    used: &mut [bool],
    slots: &mut Slots,
    out: &mut HashSet<BuildSignature>,
) {
    let depth = slots.len();
    if depth == pattern.len() {
        let effects = slots
            .iter()
            .filter_map(|slot| slot.relic_index())
            .flat_map(|i| relics[i].effects_and_curses());
        let scored = score_effects(effects, table);
        if scored.score >= minimum {
            let build = Build {
                vessel_name: name.to_string(),
                slots: slots.clone(),
                score: scored.score,
                active_effects: scored.active_effects.into_iter().cloned().collect(),
            };
            out.insert(build.signature());
        }
        return;
    }

    let requirement = pattern[depth];
    let mut filled = false;
    for &i in candidates {
        if used[i] || !requirement.admits(relics[i].color()) {
            continue;
        }
        filled = true;
        used[i] = true;
        slots.push(Slot::Filled(i));
        enumerate(relics, table, candidates, name, pattern, minimum, used, slots, out);
        slots.pop();
        used[i] = false;
    }
    if !filled && requirement.is_wildcard() {
        slots.push(Slot::Empty);
        enumerate(relics, table, candidates, name, pattern, minimum, used, slots, out);
        slots.pop();
    }
}

#[test]
fn test_vigor_scenario_collapses_to_one_build() {
    let scenario = vigor_scenario();
    let finder = BuildFinder::new(&scenario.relics, &scenario.table, 1).unwrap();
    let builds = finder.top_builds(&scenario.tree, 5, 1).unwrap();

    // A+C+B and B+C+A share relics, effects and score.
    assert_eq!(builds.len(), 1);
    let build = &builds[0];
    assert_eq!(build.vessel_name, "Vigor Vessel");
    assert_eq!(build.score, 30);
    assert_eq!(
        build.slots.as_slice(),
        &[Slot::Filled(0), Slot::Filled(2), Slot::Filled(1)]
    );
    assert_eq!(build.active_effects.len(), 3);
}

#[test]
fn test_minimum_filters_every_build() {
    let scenario = vigor_scenario();
    let finder = BuildFinder::new(&scenario.relics, &scenario.table, 1).unwrap();
    assert!(finder.top_builds(&scenario.tree, 5, 31).unwrap().is_empty());
    assert_eq!(finder.top_builds(&scenario.tree, 5, 30).unwrap().len(), 1);
}

#[test]
fn test_wildcard_falls_back_to_empty_slot() {
    let relics = vec![vigor("A", Color::Red)];
    let table = vigor_table();
    let tree = tree_of(&[("Urn", &[RED, ANY])]);

    let builds = BuildFinder::new(&relics, &table, 1)
        .unwrap()
        .top_builds(&tree, 5, 0)
        .unwrap();

    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].slots.as_slice(), &[Slot::Filled(0), Slot::Empty]);
    assert_eq!(builds[0].score, 10);
    assert!(builds[0].has_empty_slots());
}

#[test]
fn test_concrete_edge_without_candidates_is_skipped() {
    let relics = vec![vigor("A", Color::Red)];
    let table = vigor_table();
    let tree = tree_of(&[("Urn", &[BLUE, ANY]), ("Cup", &[ANY, BLUE])]);

    let builds = BuildFinder::new(&relics, &table, 1)
        .unwrap()
        .top_builds(&tree, 5, 0)
        .unwrap();
    assert!(builds.is_empty());
}

#[test]
fn test_deep_relics_never_fill_wildcards() {
    let relics = vec![vigor("A", Color::Red), vigor("D", Color::DeepRed)];
    let table = vigor_table();
    let finder = BuildFinder::new(&relics, &table, 1).unwrap();

    let shallow = finder
        .top_builds(&tree_of(&[("Urn", &[RED, ANY])]), 5, 0)
        .unwrap();
    assert_eq!(shallow.len(), 1);
    assert_eq!(shallow[0].slots.as_slice(), &[Slot::Filled(0), Slot::Empty]);

    let deep = finder
        .top_builds(&tree_of(&[("Deep Urn", &[DEEP_RED, ANY])]), 5, 0)
        .unwrap();
    assert_eq!(deep.len(), 1);
    assert_eq!(deep[0].slots.as_slice(), &[Slot::Filled(1), Slot::Filled(0)]);
}

#[test]
fn test_named_internal_node_yields_build() {
    let relics = vec![vigor("A", Color::Red), relic("B", Color::Blue, vec![Effect::new("Mind", 0)])];
    let table: ScoreTable = [("vigor", 10), ("mind", 5)].into_iter().collect();
    let tree = tree_of(&[("Short", &[RED]), ("Long", &[RED, BLUE])]);

    let builds = BuildFinder::new(&relics, &table, 1)
        .unwrap()
        .top_builds(&tree, 5, 0)
        .unwrap();

    let found: Vec<(&str, i64)> = builds
        .iter()
        .map(|b| (b.vessel_name.as_str(), b.score))
        .collect();
    assert_eq!(found, vec![("Long", 15), ("Short", 10)]);
}

#[test]
fn test_prune_threshold_zero_keeps_unscored_relics() {
    let relics = vec![vigor("A", Color::Red), relic("N", Color::Blue, vec![Effect::new("Nothing", 0)])];
    let table = vigor_table();
    let tree = tree_of(&[("Urn", &[RED, BLUE])]);

    assert!(BuildFinder::new(&relics, &table, 1)
        .unwrap()
        .top_builds(&tree, 5, 0)
        .unwrap()
        .is_empty());

    let builds = BuildFinder::new(&relics, &table, 0)
        .unwrap()
        .top_builds(&tree, 5, 0)
        .unwrap();
    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].score, 10);
}

#[test]
fn test_invalid_limits_are_config_errors() {
    let scenario = vigor_scenario();
    let finder = BuildFinder::new(&scenario.relics, &scenario.table, 1).unwrap();

    assert!(matches!(
        finder.top_builds(&scenario.tree, 0, 0),
        Err(RelicForgeError::Config(_))
    ));
    assert!(matches!(
        finder.top_builds(&scenario.tree, 5, -1),
        Err(RelicForgeError::Config(_))
    ));
    assert!(matches!(
        BuildFinder::new(&scenario.relics, &scenario.table, -1),
        Err(RelicForgeError::Config(_))
    ));
    assert!(matches!(
        BuildFinder::from_config(
            &scenario.relics,
            &scenario.table,
            &SearchConfig::new().with_count(0)
        ),
        Err(RelicForgeError::Config(_))
    ));
}

#[test]
fn test_pruning_matches_exhaustive_search() {
    for seed in 0..40 {
        let mut random = RandomPool::new(seed);
        let relics = random.relics(10);
        let table = random.table();
        let tree = random.tree(4, 3);
        let finder = BuildFinder::new(&relics, &table, 1).unwrap();

        for count in [1, 3, 5] {
            let limits = SearchLimits::new(count, 0);
            let pruned = finder
                .search(&tree, limits, &PathBounder, &NoopListener, &NeverTermination)
                .unwrap();
            let exhaustive = finder
                .search(&tree, limits, &NoBounder, &NoopListener, &NeverTermination)
                .unwrap();

            assert_eq!(pruned.builds, exhaustive.builds, "seed {seed}, count {count}");
            assert!(pruned.stats.nodes_visited <= exhaustive.stats.nodes_visited);
            assert_eq!(exhaustive.stats.subtrees_pruned, 0);
        }
    }
}

#[test]
fn test_matches_brute_force_enumeration() {
    for seed in 100..130 {
        let mut random = RandomPool::new(seed);
        let relics = random.relics(9);
        let table = random.table();
        let tree = random.tree(3, 3);
        let minimum = 5;

        let builds = BuildFinder::new(&relics, &table, 1)
            .unwrap()
            .top_builds(&tree, 10_000, minimum)
            .unwrap();
        let expected = brute_force(&relics, &table, &tree, 1, minimum);

        assert_eq!(signatures(&builds), expected, "seed {seed}");
        assert!(builds.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_top_k_is_best_k_of_brute_force() {
    for seed in 200..220 {
        let mut random = RandomPool::new(seed);
        let relics = random.relics(10);
        let table = random.table();
        let tree = random.tree(4, 3);
        let count = 4;

        let builds = BuildFinder::new(&relics, &table, 1)
            .unwrap()
            .top_builds(&tree, count, 0)
            .unwrap();
        let all = brute_force(&relics, &table, &tree, 1, 0);

        assert_eq!(builds.len(), count.min(all.len()), "seed {seed}");
        let found = signatures(&builds);
        assert!(found.is_subset(&all));

        // nothing left out beats the weakest kept build
        if let Some(weakest) = builds.last() {
            let full = BuildFinder::new(&relics, &table, 1)
                .unwrap()
                .top_builds(&tree, 10_000, 0)
                .unwrap();
            assert!(full
                .iter()
                .filter(|b| !found.contains(&b.signature()))
                .all(|b| b.score <= weakest.score));
        }
    }
}

#[test]
fn test_run_honors_pruning_flag() {
    let mut random = RandomPool::new(5);
    let relics = random.relics(10);
    let table = random.table();
    let tree = random.tree(4, 3);
    let config = SearchConfig::new().with_count(3);
    let finder = BuildFinder::from_config(&relics, &table, &config).unwrap();

    let with = finder
        .run(&tree, &config, &NoopListener, &NeverTermination)
        .unwrap();
    let without = finder
        .run(&tree, &config.clone().with_pruning(false), &NoopListener, &NeverTermination)
        .unwrap();

    assert_eq!(with.builds, without.builds);
    assert_eq!(without.stats.subtrees_pruned, 0);
}

#[test]
fn test_node_count_termination_stops_early() {
    let scenario = vigor_scenario();
    let finder = BuildFinder::new(&scenario.relics, &scenario.table, 1).unwrap();
    let result = finder
        .search(
            &scenario.tree,
            SearchLimits::new(5, 0),
            &PathBounder,
            &NoopListener,
            &NodeCountTermination::new(1),
        )
        .unwrap();

    assert!(result.stats.terminated_early);
    assert_eq!(result.stats.nodes_visited, 1);
    assert!(result.builds.is_empty());
}

#[test]
fn test_configured_node_limit_stops_early() {
    let scenario = vigor_scenario();
    let config = SearchConfig::new().with_node_count_limit(2);
    let finder = BuildFinder::from_config(&scenario.relics, &scenario.table, &config).unwrap();
    let result = finder
        .run(&scenario.tree, &config, &NoopListener, &NeverTermination)
        .unwrap();

    assert!(result.stats.terminated_early);
    assert_eq!(result.stats.nodes_visited, 2);
}

#[test]
fn test_external_flag_cancels_search() {
    let scenario = vigor_scenario();
    let finder = BuildFinder::new(&scenario.relics, &scenario.table, 1).unwrap();
    let flag = AtomicBool::new(true);
    let result = finder
        .search(
            &scenario.tree,
            SearchLimits::new(5, 0),
            &PathBounder,
            &NoopListener,
            &ExternalTermination::new(&flag),
        )
        .unwrap();

    assert!(result.stats.terminated_early);
    assert_eq!(result.stats.nodes_visited, 0);
    assert!(result.builds.is_empty());
}

#[test]
fn test_listener_and_stats_count_progress() {
    let scenario = vigor_scenario();
    let finder = BuildFinder::new(&scenario.relics, &scenario.table, 1).unwrap();
    let listener = CountingListener::new();
    let result = finder
        .search(
            &scenario.tree,
            SearchLimits::new(5, 0),
            &NoBounder,
            &listener,
            &NeverTermination,
        )
        .unwrap();

    // root -Red-> {A, B}, each -Blue-> C, each -Any-> the other red relic
    assert_eq!(listener.edges_visited(), 5);
    assert_eq!(listener.builds_accepted(), 1);
    assert_eq!(result.stats.edges_visited, 5);
    assert_eq!(result.stats.nodes_visited, 7);
    assert_eq!(result.stats.builds_considered, 2);
    assert_eq!(result.stats.builds_accepted, 1);
    assert!(!result.stats.terminated_early);
    assert_eq!(result.best_score(), Some(30));
}

#[test]
fn test_closure_listener() {
    let scenario = vigor_scenario();
    let finder = BuildFinder::new(&scenario.relics, &scenario.table, 1).unwrap();
    let edges = std::cell::Cell::new(0u32);
    let tick = || edges.set(edges.get() + 1);
    finder
        .search(
            &scenario.tree,
            SearchLimits::new(5, 0),
            &NoBounder,
            &tick,
            &NeverTermination,
        )
        .unwrap();
    assert_eq!(edges.get(), 5);
}
