// Built-in card search fields

use super::types::{FieldConfig, ValueKind};

const COLORS: &[&str] = &[
    "white",
    "blue",
    "black",
    "red",
    "green",
    "colorless",
    "multicolor",
];

const FORMATS: &[&str] = &[
    "standard",
    "pioneer",
    "modern",
    "legacy",
    "vintage",
    "commander",
    "oathbreaker",
    "pauper",
    "paupercommander",
    "brawl",
    "standardbrawl",
    "historic",
    "timeless",
    "alchemy",
    "explorer",
    "penny",
    "duel",
    "oldschool",
    "premodern",
    "predh",
    "future",
    "gladiator",
];

const RARITIES: &[&str] = &["common", "uncommon", "rare", "mythic", "special", "bonus"];

const PROPERTIES: &[&str] = &[
    "foil",
    "nonfoil",
    "fullart",
    "reserved",
    "reprint",
    "spell",
    "permanent",
    "commander",
    "funny",
];

const GAMES: &[&str] = &["paper", "mtgo", "arena"];

fn options(values: &[&str]) -> ValueKind {
    ValueKind::enumeration(values.iter().copied())
}

fn numeric(min: f64, max: f64, step: f64) -> ValueKind {
    ValueKind::Numeric { min, max, step }
}

pub fn standard_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new("name", "Name", ValueKind::Text).with_aliases(&["n"]),
        FieldConfig::new("oracle", "Rules Text", ValueKind::Text).with_aliases(&["o"]),
        FieldConfig::new("type", "Type Line", ValueKind::Text).with_aliases(&["t"]),
        FieldConfig::new("color", "Color", options(COLORS)).with_aliases(&["c"]),
        FieldConfig::new("identity", "Color Identity", options(COLORS))
            .with_aliases(&["id", "ci"]),
        FieldConfig::new("manavalue", "Mana Value", numeric(0.0, 20.0, 1.0))
            .with_aliases(&["mv", "cmc"]),
        FieldConfig::new("power", "Power", numeric(0.0, 20.0, 1.0)).with_aliases(&["pow"]),
        FieldConfig::new("toughness", "Toughness", numeric(0.0, 20.0, 1.0)).with_aliases(&["tou"]),
        FieldConfig::new("loyalty", "Loyalty", numeric(0.0, 10.0, 1.0)).with_aliases(&["loy"]),
        FieldConfig::new("set", "Set", ValueKind::Text).with_aliases(&["s", "e", "edition"]),
        FieldConfig::new("rarity", "Rarity", options(RARITIES)).with_aliases(&["r"]),
        FieldConfig::new("format", "Format", options(FORMATS))
            .with_aliases(&["f", "legal"]),
        FieldConfig::new("banned", "Banned In", options(FORMATS)),
        FieldConfig::new("restricted", "Restricted In", options(FORMATS)),
        FieldConfig::new("artist", "Artist", ValueKind::Text).with_aliases(&["a"]),
        FieldConfig::new("flavor", "Flavor Text", ValueKind::Text).with_aliases(&["ft"]),
        FieldConfig::new("keyword", "Keyword", ValueKind::Text).with_aliases(&["kw"]),
        FieldConfig::new("usd", "Price (USD)", numeric(0.0, 10000.0, 0.01)),
        FieldConfig::new("year", "Release Year", numeric(1993.0, 2030.0, 1.0)),
        FieldConfig::new("is", "Card Property", options(PROPERTIES)),
        FieldConfig::new("game", "Game", options(GAMES)),
    ]
}
