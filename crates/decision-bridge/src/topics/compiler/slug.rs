const SLUG_OVERRIDES: &[(&str, &str)] = &[
    ("tz_july_safari", "tanzania-safari-in-july"),
    ("ke_august_migration", "kenya-great-migration-august"),
    ("kenya_vs_tanzania_first_safari", "kenya-or-tanzania-first-safari"),
    ("serengeti_calving_february", "serengeti-calving-season-february"),
    ("bw_okavango_luxury_fly_in", "okavango-delta-luxury-fly-in"),
    ("safari_price_drop_wait", "should-i-wait-for-safari-prices-to-drop"),
    ("ug_gorilla_trek_rainy_season", "uganda-gorilla-trekking-rainy-season"),
];

/// Deterministic public slug for a topic id.
pub fn slug_for(id: &str) -> String {
    SLUG_OVERRIDES
        .iter()
        .find(|(topic_id, _)| *topic_id == id)
        .map(|(_, slug)| (*slug).to_string())
        .unwrap_or_else(|| fallback_slug(id))
}

fn fallback_slug(id: &str) -> String {
    id.trim().to_ascii_lowercase().replace('_', "-")
}
