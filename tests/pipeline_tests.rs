mod common;

use std::fs;

use lorefuse::config::PipelineConfig;
use lorefuse::data::loader::load_all;
use lorefuse::pipeline::{fuse, run};
use serde_json::Value;

fn fused_json(config: &PipelineConfig) -> Value {
    run(config).expect("pipeline should run");
    let raw = fs::read_to_string(&config.output_path).expect("output written");
    serde_json::from_str(&raw).expect("output is json")
}

#[test]
fn fuse_writes_counts_and_indexes() {
    let dir = common::fixture_dir();
    let config = PipelineConfig::rooted_at(dir.path());
    let doc = fused_json(&config);

    let metadata = &doc["metadata"];
    assert_eq!(metadata["total_weapons"], 3);
    assert_eq!(metadata["total_bosses"], 2);
    assert_eq!(metadata["total_locations"], 1);
    assert_eq!(metadata["total_armors"], 2);
    assert_eq!(metadata["total_sorceries"], 0);
    assert_eq!(metadata["total_skills"], 0);
    let metadata_keys: Vec<_> = metadata.as_object().unwrap().keys().cloned().collect();
    assert_eq!(metadata_keys.first().map(String::as_str), Some("total_weapons"));
    assert_eq!(metadata_keys.last().map(String::as_str), Some("total_skills"));

    let summary = &doc["indexes"]["weapon_index_summary"];
    assert_eq!(
        summary["damage_types"],
        serde_json::json!(["Slash", "Pierce", "Strike", "Standard"])
    );
    assert_eq!(summary["status_effects"], serde_json::json!(["Hemorrhage"]));
    assert_eq!(
        doc["indexes"]["location_index"]["boss_to_locations"]["margit, the fell omen"],
        serde_json::json!(["Stormhill"])
    );
    assert_eq!(
        doc["indexes"]["location_index"]["npc_to_locations"]["roderika"],
        serde_json::json!(["Stormhill"])
    );
    assert_eq!(doc["indexes"]["armor_types"], serde_json::json!(["Helm", "Chest Armor"]));
}

#[test]
fn weapons_are_joined_with_stats_and_lore() {
    let dir = common::fixture_dir();
    let config = PipelineConfig::rooted_at(dir.path());
    let doc = fused_json(&config);

    let uchigatana = &doc["weapons"][0];
    assert_eq!(uchigatana["name"], "Uchigatana");
    assert_eq!(uchigatana["lore"], "Blade of the Land of Reeds.");
    assert_eq!(uchigatana["primary_scaling"], "Dex");
    assert_eq!(uchigatana["requirements"]["Dex"], 15);
    assert_eq!(uchigatana["base_damage"]["Phy"], "115");
    assert_eq!(doc["weapons"][1]["primary_scaling"], "Str");
}

#[test]
fn boss_profile_scores_bleed_slash_weapon_at_thirteen() {
    let dir = common::fixture_dir();
    let config = PipelineConfig::rooted_at(dir.path());
    let doc = fused_json(&config);

    let margit = &doc["bosses"][0];
    assert_eq!(margit["name"], "Margit, the Fell Omen");
    assert_eq!(margit["description"], "An omen who guards the castle.");
    assert_eq!(margit["locations"], serde_json::json!(["Stormhill"]));
    assert_eq!(margit["drops"], serde_json::json!(["Talisman Pouch"]));
    assert_eq!(margit["weakest_physical"], "Slash");
    assert_eq!(margit["physical_negation_uniform"], false);
    assert_eq!(
        margit["status_vulnerabilities"],
        serde_json::json!(["Hemorrhage", "Poison"])
    );
    assert_eq!(margit["status_resistance_values"]["Hemorrhage"], "40 / 80");
    assert_eq!(margit["dominant_damage"], "Slash, Holy");
    assert_eq!(margit["parryable"], true);

    let recommended = margit["recommended_weapons"].as_object().unwrap();
    assert_eq!(recommended.keys().collect::<Vec<_>>(), vec!["dexterity"]);
    let top = &recommended["dexterity"][0];
    assert_eq!(top["name"], "Uchigatana");
    assert_eq!(top["score"], 13);
    assert_eq!(
        top["reason"],
        "Exploits Slash weakness; Applies Hemorrhage (boss resistance: 40 / 80)"
    );

    let sentinel = &doc["bosses"][1];
    assert_eq!(sentinel["description"], "A golden knight.");
    assert_eq!(sentinel["weakest_physical"], "Unknown");
    assert_eq!(sentinel["parryable"], "Unknown");
    assert_eq!(sentinel["stance"], 0.0);
    assert_eq!(sentinel["defense"], 0.0);
    assert!(sentinel["recommended_weapons"].as_object().unwrap().is_empty());
}

#[test]
fn output_is_byte_identical_across_runs() {
    let dir = common::fixture_dir();
    let mut first = PipelineConfig::rooted_at(dir.path());
    first.output_path = dir.path().join("first.json");
    let mut second = first.clone();
    second.output_path = dir.path().join("second.json");

    run(&first).unwrap();
    run(&second).unwrap();
    assert_eq!(
        fs::read(&first.output_path).unwrap(),
        fs::read(&second.output_path).unwrap()
    );
}

#[test]
fn scoring_weights_come_from_config() {
    let dir = common::fixture_dir();
    let mut config = PipelineConfig::from_yaml(
        "scoring:\n  meaningful_weakness_bonus: 5\n  status_tier_weights: [20, 7]\n",
    )
    .unwrap();
    config.data_dir = dir.path().to_path_buf();
    config.lore_path = dir.path().join("master_lore.json");

    let document = fuse(&load_all(&config), &config);
    let margit = &document.bosses[0];
    let dex = margit
        .vulnerability
        .recommended_weapons
        .values()
        .next()
        .expect("one build");
    assert_eq!(dex[0].score, 25);
}

#[test]
fn missing_data_dir_yields_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PipelineConfig::rooted_at(dir.path().join("absent"));
    config.output_path = dir.path().join("nested/out.json");
    let doc = fused_json(&config);

    assert_eq!(doc["metadata"]["total_weapons"], 0);
    assert_eq!(doc["weapons"], serde_json::json!([]));
    assert_eq!(
        doc["indexes"]["location_index"]["boss_to_locations"],
        serde_json::json!({})
    );
}

#[test]
fn unwritable_output_is_an_error() {
    let dir = common::fixture_dir();
    let mut config = PipelineConfig::rooted_at(dir.path());
    // A regular file cannot act as a parent directory.
    config.output_path = dir.path().join("weapons.csv").join("out.json");
    assert!(run(&config).is_err());
}
