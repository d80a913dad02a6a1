use super::super::domain::{Outcome, Season, TimeContext, TravelerSegment};
use chrono::Month;

pub(crate) const DEFAULT_DESTINATIONS: &[&str] = &["Tanzania", "Kenya"];

const COUNTRY_CODES: &[(&str, &str, &str)] = &[
    ("tz", "tanzania", "Tanzania"),
    ("ke", "kenya", "Kenya"),
    ("bw", "botswana", "Botswana"),
    ("za", "south_africa", "South Africa"),
    ("ug", "uganda", "Uganda"),
    ("rw", "rwanda", "Rwanda"),
    ("na", "namibia", "Namibia"),
    ("zm", "zambia", "Zambia"),
    ("zw", "zimbabwe", "Zimbabwe"),
];

const DESTINATION_KEYWORDS: &[(&str, &str)] = &[
    ("tanzania", "Tanzania"),
    ("serengeti", "Tanzania"),
    ("ngorongoro", "Tanzania"),
    ("kilimanjaro", "Tanzania"),
    ("kenya", "Kenya"),
    ("masai mara", "Kenya"),
    ("maasai mara", "Kenya"),
    ("amboseli", "Kenya"),
    ("botswana", "Botswana"),
    ("okavango", "Botswana"),
    ("south africa", "South Africa"),
    ("kruger", "South Africa"),
    ("uganda", "Uganda"),
    ("bwindi", "Uganda"),
    ("rwanda", "Rwanda"),
    ("namibia", "Namibia"),
    ("etosha", "Namibia"),
    ("zambia", "Zambia"),
    ("south luangwa", "Zambia"),
    ("zimbabwe", "Zimbabwe"),
    ("hwange", "Zimbabwe"),
];

const MONTH_SPECIFIC_TOPICS: &[(&str, Month, Option<Season>)] = &[
    ("tz_july_safari", Month::July, Some(Season::Dry)),
    ("ke_august_migration", Month::August, Some(Season::Dry)),
    ("serengeti_calving_february", Month::February, Some(Season::Calving)),
    ("bw_october_heat", Month::October, Some(Season::Dry)),
];

const SEASON_KEYWORDS: &[(&str, Season)] = &[
    ("dry season", Season::Dry),
    ("green season", Season::Green),
    ("calving", Season::Calving),
];

const SEGMENT_KEYWORDS: &[(TravelerSegment, &[&str])] = &[
    (
        TravelerSegment::FirstTime,
        &["first safari", "first-time", "first time", "first-timer", "first timer"],
    ),
    (TravelerSegment::Solo, &["solo", "alone"]),
    (
        TravelerSegment::Families,
        &["family", "families", "kids", "children"],
    ),
    (
        TravelerSegment::BudgetConscious,
        &["budget", "cheap", "affordable", "prices drop", "value for money"],
    ),
    (
        TravelerSegment::Luxury,
        &["luxury", "splurge", "premium", "fly-in", "fly in"],
    ),
    (
        TravelerSegment::Repeat,
        &["repeat", "second safari", "returning", "been before"],
    ),
];

const HIGH_UNCERTAINTY_TOPICS: &[&str] = &[
    "safari_price_drop_wait",
    "ug_gorilla_trek_rainy_season",
    "tz_green_season_budget",
];

const CAUTION_TOPICS: &[&str] = &[
    "safari_price_drop_wait",
    "ug_gorilla_trek_rainy_season",
    "tz_dry_season_crowds",
];

fn country_for_token(token: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(code, name, _)| *code == token || *name == token)
        .map(|(_, _, country)| *country)
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

/// Text the keyword rules scan: the id with separators opened up, then the question.
fn searchable_text(id: &str, question: &str) -> String {
    format!("{} {}", id.replace('_', " "), question).to_lowercase()
}

/// Returns `None` when no rule matched and the default set should apply.
pub(crate) fn infer_destinations(id: &str, question: &str) -> Option<Vec<String>> {
    let id = id.to_ascii_lowercase();

    if let Some(country) = prefixed_country(&id) {
        return Some(vec![country.to_string()]);
    }

    if let Some((left, right)) = comparison_countries(&id) {
        let mut destinations = Vec::new();
        push_unique(&mut destinations, left);
        push_unique(&mut destinations, right);
        return Some(destinations);
    }

    let question = question.to_lowercase();
    let mut hits: Vec<(usize, &str)> = DESTINATION_KEYWORDS
        .iter()
        .filter_map(|(keyword, country)| question.find(keyword).map(|pos| (pos, *country)))
        .collect();
    hits.sort_by_key(|(pos, _)| *pos);

    let mut destinations = Vec::new();
    for (_, country) in hits {
        push_unique(&mut destinations, country);
    }

    if destinations.is_empty() {
        None
    } else {
        Some(destinations)
    }
}

pub(crate) fn default_destinations() -> Vec<String> {
    DEFAULT_DESTINATIONS
        .iter()
        .map(|destination| destination.to_string())
        .collect()
}

fn prefixed_country(id: &str) -> Option<&'static str> {
    let mut segments = id.split('_');
    let code = segments.next()?;
    if code.len() != 2 || segments.next() == Some("vs") {
        return None;
    }
    COUNTRY_CODES
        .iter()
        .find(|(candidate, _, _)| *candidate == code)
        .map(|(_, _, country)| *country)
}

fn comparison_countries(id: &str) -> Option<(&'static str, &'static str)> {
    let (left, right) = id.split_once("_vs_")?;

    let left_country = COUNTRY_CODES.iter().find_map(|(code, name, country)| {
        let matches = left == *code
            || left == *name
            || left.ends_with(&format!("_{code}"))
            || left.ends_with(&format!("_{name}"));
        matches.then_some(*country)
    });

    let right_country = right
        .split('_')
        .next()
        .and_then(country_for_token)
        .or_else(|| {
            COUNTRY_CODES
                .iter()
                .find(|(_, name, _)| right == *name || right.starts_with(&format!("{name}_")))
                .map(|(_, _, country)| *country)
        });

    match (left_country, right_country) {
        (Some(left), Some(right)) => Some((left, right)),
        _ => None,
    }
}

pub(crate) fn infer_time_context(id: &str, question: &str) -> Option<TimeContext> {
    if let Some((_, month, season)) = MONTH_SPECIFIC_TOPICS
        .iter()
        .find(|(topic_id, _, _)| *topic_id == id)
    {
        return Some(TimeContext {
            month: Some(month.name().to_string()),
            season: *season,
        });
    }

    let question = question.to_lowercase();
    SEASON_KEYWORDS
        .iter()
        .find(|(keyword, _)| question.contains(keyword))
        .map(|(_, season)| TimeContext {
            month: None,
            season: Some(*season),
        })
}

/// Canonicalizes authored month names ("jul", "JULY") to "July"; unknown text is kept.
pub(crate) fn normalize_month(raw: &str) -> String {
    raw.trim()
        .parse::<Month>()
        .map(|month| month.name().to_string())
        .unwrap_or_else(|_| raw.trim().to_string())
}

/// Returns an empty list when nothing matched.
pub(crate) fn infer_segments(id: &str, question: &str) -> Vec<TravelerSegment> {
    let text = searchable_text(id, question);
    SEGMENT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(segment, _)| *segment)
        .collect()
}

pub(crate) fn is_comparison_question(question: &str) -> bool {
    let question = question.to_lowercase();
    question.contains(" or ") || question.contains(" vs ") || question.contains(" vs. ")
}

pub(crate) fn infer_eligible_outcomes(id: &str, question: &str) -> Vec<Outcome> {
    if is_comparison_question(question) {
        vec![Outcome::Book, Outcome::Switch]
    } else if HIGH_UNCERTAINTY_TOPICS.contains(&id) {
        Outcome::ordered().to_vec()
    } else {
        vec![Outcome::Book, Outcome::Wait, Outcome::Switch]
    }
}

pub(crate) fn rule_default_outcome(id: &str) -> Outcome {
    if CAUTION_TOPICS.contains(&id) {
        Outcome::Wait
    } else {
        Outcome::Book
    }
}
