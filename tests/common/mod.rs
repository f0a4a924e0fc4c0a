//! Shared fixtures: a small data directory covering weapons, bosses, locations and armors.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const WEAPONS_CSV: &str = "\
name,description,category,damage type,requirements,passive effect,skill,FP cost,weight,dlc
Uchigatana,A katana.,Katana,Slash/Pierce,\"{'Str': 11, 'Dex': 15}\",Causes blood loss buildup (45),Unsheathe,0,5.5,0
Club,A club.,Hammer,Strike,{},None,Barbaric Roar,0,4.0,0
Estoc,Thrusting sword.,Heavy Thrusting Sword,Standard/Pierce,{},None,Impaling Thrust,0,7.5,0
";

pub const WEAPON_STATS_CSV: &str = "\
Name,Str,Dex,Int,Fai,Arc,Phy,Mag,Fir,Lit,Hol
Uchigatana,E,C,-,-,-,115,0,0,0,0
Club,C,-,-,-,-,103,0,0,0,0
Estoc,D,C,-,-,-,131,0,0,0,0
";

pub const BOSS_STATS_CSV: &str = "\
boss,neg_standard,neg_slash,neg_strike,neg_pierce,res_hemorrhage,res_frostbite,res_poison,res_scarlet_rot,inflicts_bleed,dmg_slash,dmg_holy,parryable,stance,defense
Margit the Fell Omen,10,0,10,10,40 / 80,Immune,100,Immune,0,1,1,1,80,103
";

pub const BOSSES_CSV: &str = "\
name,blockquote,HP,Locations & Drops,dlc
\"Margit, the Fell Omen\",,4174,\"{'Stormhill:': ['12,000', 'Talisman Pouch']}\",0
Tree Sentinel,A golden knight.,3000,,0
";

pub const LOCATIONS_CSV: &str = "\
name,description,region,items,npcs,creatures,bosses,dlc
Stormhill,Windswept hill.,Limgrave,[],['Roderika'],[],\"['Margit, the Fell Omen']\",0
";

pub const ARMORS_CSV: &str = "\
name,description,type,damage negation,resistance,weight,special effect,how to acquire,dlc
Knight Helm,A helm.,Helm,\"[{'Phy': 4.2}]\",\"[{'Immunity': 20}]\",4.1,,Merchant,0
Knight Armor,An armor.,Chest Armor,{},{},10.2,,Merchant,0
";

pub const LORE_JSON: &str = r#"{"Margit, the Fell Omen": "An omen who guards the castle.", "Uchigatana": "Blade of the Land of Reeds."}"#;

/// Write the fixture data set into a fresh temp directory.
pub fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write_fixtures(dir.path());
    dir
}

pub fn write_fixtures(root: &Path) {
    for (name, content) in [
        ("weapons.csv", WEAPONS_CSV),
        ("elden_ring_weapon.csv", WEAPON_STATS_CSV),
        ("elden_ring_boss_stats_clean.csv", BOSS_STATS_CSV),
        ("bosses.csv", BOSSES_CSV),
        ("locations.csv", LOCATIONS_CSV),
        ("armors.csv", ARMORS_CSV),
        ("master_lore.json", LORE_JSON),
    ] {
        fs::write(root.join(name), content).expect("write fixture");
    }
}

/// YAML config pointing every path into `root`.
pub fn write_config(root: &Path, extra: &str) -> std::path::PathBuf {
    let path = root.join("lorefuse.yaml");
    let yaml = format!(
        "data_dir: {root}\nlore_path: {root}/master_lore.json\noutput_path: {root}/out/enriched.json\n{extra}",
        root = root.display()
    );
    fs::write(&path, yaml).expect("write config");
    path
}
