use super::{CatalogInput, InputType};

pub const BUDGET_BAND: &str = "user_context.budget_band";
pub const COMFORT_LEVEL: &str = "user_context.comfort_level";
pub const DATES_MONTH: &str = "user_context.dates.month";
pub const DATES_YEAR: &str = "user_context.dates.year";
pub const DATES_FLEXIBILITY: &str = "user_context.dates.flexible";
pub const TRIP_LENGTH_DAYS: &str = "user_context.trip_length_days";
pub const PARTY_ADULTS: &str = "user_context.party.adults";
pub const PARTY_CHILDREN_AGES: &str = "user_context.party.children_ages";
pub const FIRST_SAFARI: &str = "user_context.first_safari";
pub const RISK_TOLERANCE: &str = "user_context.risk_tolerance";
pub const CROWD_TOLERANCE: &str = "user_context.crowd_tolerance";

type EntryRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    InputType,
    &'static [&'static str],
);

const STANDARD_ENTRIES: &[EntryRow] = &[
    (
        BUDGET_BAND,
        "Budget band",
        "How much the traveler is prepared to spend relative to typical prices for this trip.",
        "fair_value",
        InputType::Enum,
        &["budget", "fair_value", "premium"],
    ),
    (
        COMFORT_LEVEL,
        "Comfort level",
        "Minimum standard of accommodation and logistics the traveler will accept.",
        "comfortable",
        InputType::Enum,
        &["basic", "comfortable", "indulgent"],
    ),
    (
        DATES_MONTH,
        "Travel month",
        "Month the trip would start in.",
        "July",
        InputType::String,
        &[],
    ),
    (
        DATES_YEAR,
        "Travel year",
        "Calendar year of the trip.",
        "2026",
        InputType::Number,
        &[],
    ),
    (
        DATES_FLEXIBILITY,
        "Flexible dates",
        "Whether the travel dates can move by a few weeks.",
        "false",
        InputType::Boolean,
        &[],
    ),
    (
        TRIP_LENGTH_DAYS,
        "Trip length (days)",
        "Number of days on the ground, excluding international flights.",
        "8",
        InputType::Number,
        &[],
    ),
    (
        PARTY_ADULTS,
        "Adults travelling",
        "Number of adults in the party.",
        "2",
        InputType::Number,
        &[],
    ),
    (
        PARTY_CHILDREN_AGES,
        "Children's ages",
        "Ages of any children travelling, used for lodge age limits and pacing.",
        "[7, 11]",
        InputType::Array,
        &[],
    ),
    (
        FIRST_SAFARI,
        "First safari",
        "Whether this is the traveler's first safari.",
        "true",
        InputType::Boolean,
        &[],
    ),
    (
        RISK_TOLERANCE,
        "Risk tolerance",
        "How comfortable the traveler is with weather, wildlife, or logistics uncertainty.",
        "medium",
        InputType::Enum,
        &["low", "medium", "high"],
    ),
    (
        CROWD_TOLERANCE,
        "Crowd tolerance",
        "How much the traveler minds sharing sightings with other vehicles.",
        "low",
        InputType::Enum,
        &["low", "medium", "high"],
    ),
    (
        "user_context.priorities",
        "Trip priorities",
        "What the traveler most wants out of the trip, in order.",
        "[\"big cats\", \"photography\"]",
        InputType::Array,
        &[],
    ),
    (
        "user_context.wildlife_priority",
        "Wildlife priority",
        "The single wildlife experience that would make or break the trip.",
        "Great Migration river crossings",
        InputType::String,
        &[],
    ),
    (
        "user_context.origin_region",
        "Departure region",
        "Where the traveler flies from, which drives routing and jet lag.",
        "North America",
        InputType::String,
        &[],
    ),
    (
        "user_context.accommodation_style",
        "Accommodation style",
        "Preferred type of camp or lodge.",
        "tented_camp",
        InputType::Enum,
        &["lodge", "tented_camp", "mobile_camp"],
    ),
    (
        "user_context.booking_lead_months",
        "Booking lead time (months)",
        "How many months ahead of travel the traveler is booking.",
        "9",
        InputType::Number,
        &[],
    ),
    (
        "user_context.health.malaria_concern",
        "Malaria concern",
        "Whether the traveler wants to avoid malaria areas.",
        "false",
        InputType::Boolean,
        &[],
    ),
    (
        "user_context.mobility_notes",
        "Mobility notes",
        "Anything that limits long drives, walking safaris, or small-plane transfers.",
        "Prefers game drives under four hours",
        InputType::String,
        &[],
    ),
    (
        "request.destinations_considered",
        "Destinations considered",
        "Countries or parks the traveler is choosing between.",
        "[\"Tanzania\", \"Kenya\"]",
        InputType::Array,
        &[],
    ),
];

pub(super) fn standard_entries() -> Vec<CatalogInput> {
    STANDARD_ENTRIES
        .iter()
        .map(
            |(key, label, description, example, input_type, allowed)| CatalogInput {
                key: (*key).to_string(),
                label: (*label).to_string(),
                description: (*description).to_string(),
                example: (*example).to_string(),
                input_type: *input_type,
                allowed_values: if allowed.is_empty() {
                    None
                } else {
                    Some(allowed.iter().map(|value| (*value).to_string()).collect())
                },
            },
        )
        .collect()
}
