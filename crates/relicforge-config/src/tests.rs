//! Tests for search configuration, score files and vessel catalogs.

use relicforge_core::{Color, Effect, SlotRequirement};

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        count = 5
        minimum = 12
        prune = 3
        enable_pruning = false

        [termination]
        seconds_spent_limit = 30
        node_count_limit = 100000
    "#;

    let config = SearchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.count, 5);
    assert_eq!(config.minimum, 12);
    assert_eq!(config.prune, 3);
    assert!(!config.enable_pruning);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    assert_eq!(config.node_count_limit(), Some(100_000));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        count: 3
        termination:
          seconds_spent_limit: 5
    "#;

    let config = SearchConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.count, 3);
    assert_eq!(config.minimum, 0);
    assert!(config.enable_pruning);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
}

#[test]
fn test_defaults() {
    let config = SearchConfig::from_toml_str("").unwrap();
    assert_eq!(config, SearchConfig::default());
    assert_eq!(config.count, 10);
    assert_eq!(config.prune, 1);
    assert!(config.termination.is_none());
}

#[test]
fn test_builder() {
    let config = SearchConfig::new()
        .with_count(3)
        .with_minimum(1)
        .with_prune(0)
        .with_pruning(false)
        .with_termination_seconds(60)
        .with_node_count_limit(500);

    assert_eq!(config.count, 3);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.node_count_limit(), Some(500));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_limits() {
    assert!(matches!(
        SearchConfig::new().with_count(0).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SearchConfig::new().with_minimum(-1).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SearchConfig::new().with_prune(-2).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(SearchConfig::from_toml_str("count = 0").is_err());
}

#[test]
fn test_config_error_converts_to_core_error() {
    let err: RelicForgeError = ConfigError::UnknownClass("bard".to_string()).into();
    assert_eq!(err, RelicForgeError::Config("Unknown build class: bard".to_string()));
}

#[test]
fn test_strip_relaxed_json() {
    let text = r#"
        // leading comment
        {
            "10": ["vigor", "a // not a comment",], /* block
            comment */
            "5": "mind",
        }
    "#;
    let stripped = strip_relaxed_json(text);
    let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
    assert_eq!(value["10"][1], "a // not a comment");
    assert_eq!(value["5"], "mind");
}

#[test]
fn test_strip_keeps_escaped_quotes() {
    let stripped = strip_relaxed_json(r#"{"a \" , }": 1,}"#);
    assert_eq!(stripped, r#"{"a \" , }": 1}"#);
}

#[test]
fn test_parse_grouped_score_file() {
    let table = parse_score_table(
        r#"{
            "10": ["Vigor", "improved sorcery +*"],
            "-5": "reduced vigor",
            "mind": 7,
        }"#,
    )
    .unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(table.score_of(&Effect::new("Vigor", 1)), 20);
    assert_eq!(table.score_of(&Effect::new("Improved Sorcery", 3)), 10);
    assert_eq!(table.score_of(&Effect::new("Reduced Vigor", 0)), -5);
    assert_eq!(table.score_of(&Effect::new("Mind", 0)), 7);
}

#[test]
fn test_later_group_overrides_earlier() {
    let vigor = Effect::new("Vigor", 0);

    let table = parse_score_table(r#"{ "5": "vigor", "10": "vigor" }"#).unwrap();
    assert_eq!(table.score_of(&vigor), 10);

    let table = parse_score_table(r#"{ "10": "vigor", "5": "vigor" }"#).unwrap();
    assert_eq!(table.score_of(&vigor), 5);

    let table = parse_score_table(r#"{ "vigor": 2, "-3": ["vigor"] }"#).unwrap();
    assert_eq!(table.score_of(&vigor), -3);
}

#[test]
fn test_parse_rejects_non_object_root() {
    assert!(matches!(parse_score_table("[1, 2]"), Err(ConfigError::Invalid(_))));
    assert!(matches!(parse_score_table("{"), Err(ConfigError::Json(_))));
}

#[test]
fn test_parse_rejects_malformed_entries() {
    assert!(matches!(
        parse_score_table(r#"{"10": [1]}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        parse_score_table(r#"{"vigor": "high"}"#),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_builtin_score_tables_parse() {
    let names: Vec<&str> = builtin_score_table_names().collect();
    assert_eq!(names, vec!["default", "sorcery"]);
    for name in names {
        let table = builtin_score_table(name).unwrap();
        assert!(!table.is_empty(), "{name}");
    }
    let sorcery = resolve_score_table("Sorcery").unwrap();
    assert_eq!(sorcery.score_of(&Effect::new("Improved Sorcery", 2)), 40);
}

#[test]
fn test_unknown_builtin_score_table() {
    assert!(matches!(
        builtin_score_table("bard"),
        Err(ConfigError::UnknownScoreTable(_))
    ));
    assert!(matches!(
        resolve_score_table("/nonexistent/scores.json"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_builtin_catalog() {
    let catalog = VesselCatalog::builtin();
    assert!(catalog.validate().is_ok());
    assert_eq!(catalog.classes(), vec!["executor", "guardian", "raider"]);

    let raider = catalog.tree_for("Raider").unwrap();
    assert_eq!(raider.vessel_count(), 8);
    assert_eq!(raider.remaining_depth(), 3);

    let chalice = raider
        .child(SlotRequirement::Color(Color::Red))
        .and_then(|n| n.child(SlotRequirement::Color(Color::Red)))
        .and_then(|n| n.child(SlotRequirement::Any))
        .unwrap();
    assert_eq!(chalice.name(), Some("Raider's Chalice"));
}

#[test]
fn test_unknown_class() {
    assert!(matches!(
        VesselCatalog::builtin().tree_for("bard"),
        Err(ConfigError::UnknownClass(_))
    ));
}

#[test]
fn test_catalog_yaml_and_merge() {
    let extra = VesselCatalog::from_yaml_str(
        r#"
        vessels:
          - class: raider
            name: "Raider's Urn"
            slots: [deep_red, deep_green, deep_green]
          - class: recluse
            name: "Recluse's Urn"
            slots: [blue, blue, any]
        "#,
    )
    .unwrap();

    let mut catalog = VesselCatalog::builtin();
    catalog.merge(extra);

    assert_eq!(catalog.classes(), vec!["executor", "guardian", "raider", "recluse"]);
    let raider = catalog.tree_for("raider").unwrap();
    assert_eq!(raider.vessel_count(), 8);
    assert!(raider.child(SlotRequirement::Color(Color::DeepRed)).is_some());
    assert_eq!(catalog.tree_for("recluse").unwrap().vessel_count(), 4);
}

#[test]
fn test_catalog_rejects_mixed_slot_counts() {
    let result = VesselCatalog::from_toml_str(
        r#"
        [[vessels]]
        class = "raider"
        name = "Short"
        slots = ["red", "red"]

        [[vessels]]
        class = "raider"
        name = "Long"
        slots = ["red", "red", "red"]
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_catalog_rejects_unknown_color() {
    let result = VesselCatalog::from_toml_str(
        r#"
        [[vessels]]
        class = "raider"
        name = "Odd"
        slots = ["purple"]
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}
