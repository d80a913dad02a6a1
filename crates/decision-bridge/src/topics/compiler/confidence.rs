use super::super::domain::DecisionComplexity;

pub const DEFAULT_CONFIDENCE_RANGE: [f64; 2] = [0.6, 0.85];

const COMPLEXITY_CLASSIFICATION: &[(&str, DecisionComplexity)] = &[
    ("tz_july_safari", DecisionComplexity::Binary),
    ("bw_okavango_luxury_fly_in", DecisionComplexity::Binary),
    ("ke_august_migration", DecisionComplexity::Conditional),
    ("serengeti_calving_february", DecisionComplexity::Conditional),
    ("tz_green_season_budget", DecisionComplexity::Conditional),
    ("rw_vs_ug_gorilla_permits", DecisionComplexity::Conditional),
    ("kenya_vs_tanzania_first_safari", DecisionComplexity::MultiFactor),
    ("botswana_vs_south_africa_families", DecisionComplexity::MultiFactor),
    ("safari_price_drop_wait", DecisionComplexity::MultiFactor),
];

pub(crate) fn classified_complexity(id: &str) -> Option<DecisionComplexity> {
    COMPLEXITY_CLASSIFICATION
        .iter()
        .find(|(topic_id, _)| *topic_id == id)
        .map(|(_, complexity)| *complexity)
}

pub fn confidence_range(complexity: Option<DecisionComplexity>) -> [f64; 2] {
    match complexity {
        Some(DecisionComplexity::Binary) => [0.7, 0.9],
        Some(DecisionComplexity::Conditional) => [0.55, 0.8],
        Some(DecisionComplexity::MultiFactor) => [0.45, 0.75],
        None => DEFAULT_CONFIDENCE_RANGE,
    }
}
