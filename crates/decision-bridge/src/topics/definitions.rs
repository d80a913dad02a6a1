use super::domain::{
    DecisionComplexity, InputSpec, Season, TimeContext, TopicDefinition, TopicMetadata, Tradeoff,
    TravelerSegment,
};
use crate::catalog::{
    InputOverrides, BUDGET_BAND, COMFORT_LEVEL, CROWD_TOLERANCE, DATES_FLEXIBILITY, DATES_MONTH,
    DATES_YEAR, FIRST_SAFARI, PARTY_ADULTS, PARTY_CHILDREN_AGES, RISK_TOLERANCE,
    TRIP_LENGTH_DAYS,
};

const PRIORITIES: &str = "user_context.priorities";
const WILDLIFE_PRIORITY: &str = "user_context.wildlife_priority";
const ACCOMMODATION_STYLE: &str = "user_context.accommodation_style";
const BOOKING_LEAD_MONTHS: &str = "user_context.booking_lead_months";
const MALARIA_CONCERN: &str = "user_context.health.malaria_concern";
const MOBILITY_NOTES: &str = "user_context.mobility_notes";
const DESTINATIONS_CONSIDERED: &str = "request.destinations_considered";

/// Immutable, ordered collection of authored topic definitions.
#[derive(Debug, Clone, Default)]
pub struct TopicDefinitionSet {
    definitions: Vec<TopicDefinition>,
}

impl TopicDefinitionSet {
    /// The definitions shipped with the product.
    pub fn standard() -> Self {
        Self {
            definitions: standard_definitions(),
        }
    }

    pub fn from_definitions(definitions: Vec<TopicDefinition>) -> Self {
        Self { definitions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicDefinition> {
        self.definitions.iter()
    }

    pub fn published(&self) -> impl Iterator<Item = &TopicDefinition> {
        self.definitions
            .iter()
            .filter(|definition| definition.published)
    }

    pub fn get(&self, id: &str) -> Option<&TopicDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.id == id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &[TopicDefinition] {
        &self.definitions
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn inputs(keys: &[&str]) -> Vec<InputSpec> {
    keys.iter().map(|key| InputSpec::catalog(key)).collect()
}

fn tradeoffs(pairs: &[(&str, &str)]) -> Vec<Tradeoff> {
    pairs
        .iter()
        .map(|(gain, loss)| Tradeoff {
            gain: gain.to_string(),
            loss: loss.to_string(),
        })
        .collect()
}

struct Draft {
    id: &'static str,
    question: &'static str,
    required: Vec<InputSpec>,
    optional: Vec<InputSpec>,
    assumptions: &'static [&'static str],
    tradeoffs: &'static [(&'static str, &'static str)],
    change_conditions: &'static [&'static str],
    refusal_triggers: &'static [&'static str],
}

impl Draft {
    fn finish(self) -> TopicDefinition {
        TopicDefinition {
            id: self.id.to_string(),
            question: self.question.to_string(),
            published: true,
            required_inputs: self.required,
            optional_inputs: self.optional,
            assumptions: strings(self.assumptions),
            tradeoffs: tradeoffs(self.tradeoffs),
            change_conditions: strings(self.change_conditions),
            refusal_triggers: strings(self.refusal_triggers),
            metadata: TopicMetadata::default(),
        }
    }
}

fn standard_definitions() -> Vec<TopicDefinition> {
    let mut definitions = vec![
        Draft {
            id: "tz_july_safari",
            question: "Is July a good month for a safari in Tanzania?",
            required: inputs(&[DATES_MONTH, DATES_YEAR, BUDGET_BAND]),
            optional: inputs(&[CROWD_TOLERANCE, FIRST_SAFARI]),
            assumptions: &[
                "Travel falls between 1 and 31 July",
                "The itinerary includes the northern Serengeti",
            ],
            tradeoffs: &[
                ("Peak dry-season game viewing", "Peak-season pricing"),
                ("Chance of Mara River crossings", "Busy sightings in the northern Serengeti"),
            ],
            change_conditions: &[
                "Dates move outside the dry season",
                "Budget drops below peak-season rates",
            ],
            refusal_triggers: &["Travel year is unknown", "Traveler asks for guaranteed crossings"],
        }
        .finish(),
        Draft {
            id: "ke_august_migration",
            question: "Is August the right time to see the Great Migration in the Masai Mara?",
            required: inputs(&[DATES_MONTH, DATES_YEAR, WILDLIFE_PRIORITY]),
            optional: inputs(&[CROWD_TOLERANCE, TRIP_LENGTH_DAYS]),
            assumptions: &["Herds typically arrive in the Mara from mid-July"],
            tradeoffs: &[
                ("Highest odds of river crossings", "Crowded crossing points"),
                ("Dry, comfortable weather", "Conservancy rates at their highest"),
            ],
            change_conditions: &["Rains shift the herds late", "Trip shorter than four nights in the Mara"],
            refusal_triggers: &["Traveler requires a guaranteed crossing"],
        }
        .finish(),
        Draft {
            id: "kenya_vs_tanzania_first_safari",
            question: "Kenya or Tanzania for a first safari?",
            required: inputs(&[DATES_MONTH, BUDGET_BAND, TRIP_LENGTH_DAYS]),
            optional: inputs(&[PRIORITIES, COMFORT_LEVEL, PARTY_ADULTS]),
            assumptions: &[
                "The traveler has not been on safari before",
                "Trip length is at least seven days",
            ],
            tradeoffs: &[
                ("Kenya's shorter transfers", "Fewer wilderness areas without other vehicles"),
                ("Tanzania's scale and variety", "Longer drives between parks"),
            ],
            change_conditions: &[
                "Travel month changes the migration's location",
                "Budget tier changes",
            ],
            refusal_triggers: &["Neither country is acceptable to the traveler"],
        }
        .finish(),
        Draft {
            id: "botswana_vs_south_africa_families",
            question: "Botswana or South Africa for a family safari with young kids?",
            required: inputs(&[PARTY_CHILDREN_AGES, BUDGET_BAND, MALARIA_CONCERN]),
            optional: inputs(&[DATES_MONTH, ACCOMMODATION_STYLE]),
            assumptions: &["At least one child is under twelve"],
            tradeoffs: &[
                ("Malaria-free reserves in South Africa", "Less remote wilderness"),
                ("Botswana's exclusive camps", "Age limits at many camps"),
            ],
            change_conditions: &["Youngest child turns twelve", "Malaria concern is resolved"],
            refusal_triggers: &["Children's ages are unknown"],
        }
        .finish(),
        Draft {
            id: "serengeti_calving_february",
            question: "Is the Serengeti calving season in February worth planning around?",
            required: inputs(&[DATES_MONTH, WILDLIFE_PRIORITY]),
            optional: inputs(&[DATES_FLEXIBILITY, BUDGET_BAND]),
            assumptions: &["The itinerary includes the Ndutu area"],
            tradeoffs: &[
                ("Predator action around newborn calves", "Short rains can disrupt roads"),
                ("Green landscapes", "Shorter window than the dry season"),
            ],
            change_conditions: &["Calving starts late after a dry January"],
            refusal_triggers: &["Traveler needs a guaranteed predator kill"],
        }
        .finish(),
        Draft {
            id: "tz_green_season_budget",
            question: "Is a green season safari in Tanzania worth it on a budget?",
            required: inputs(&[BUDGET_BAND, DATES_MONTH, RISK_TOLERANCE]),
            optional: inputs(&[DATES_FLEXIBILITY, TRIP_LENGTH_DAYS]),
            assumptions: &["Travel falls between March and May"],
            tradeoffs: &[
                ("Shoulder-season rates", "Afternoon downpours"),
                ("Fewer vehicles", "Some camps closed"),
            ],
            change_conditions: &["Long rains arrive early", "Budget increases"],
            refusal_triggers: &["Traveler cannot tolerate any weather risk"],
        }
        .finish(),
        Draft {
            id: "bw_okavango_luxury_fly_in",
            question: "Is a luxury fly-in safari in the Okavango Delta worth the premium?",
            required: inputs(&[BUDGET_BAND, COMFORT_LEVEL]),
            optional: inputs(&[TRIP_LENGTH_DAYS, MOBILITY_NOTES]),
            assumptions: &["The traveler is comfortable on light aircraft"],
            tradeoffs: &[
                ("Private concessions without crowds", "Costs several times a driving safari"),
                ("No long road transfers", "Strict luggage limits on light aircraft"),
            ],
            change_conditions: &["Budget band drops below premium"],
            refusal_triggers: &["Traveler cannot fly on small aircraft"],
        }
        .finish(),
        Draft {
            id: "solo_safari_group_join",
            question: "Should a solo traveler join a shared group safari?",
            required: inputs(&[BUDGET_BAND, TRIP_LENGTH_DAYS]),
            optional: inputs(&[PRIORITIES]),
            assumptions: &["The traveler is willing to share a vehicle"],
            tradeoffs: &[
                ("No single supplement on shared departures", "Fixed itinerary"),
                ("Built-in company", "Less control over time at sightings"),
            ],
            change_conditions: &["A private guide becomes affordable"],
            refusal_triggers: &[],
        }
        .finish(),
        Draft {
            id: "ke_repeat_safari_northern_kenya",
            question: "Is northern Kenya worth it for a repeat safari?",
            required: inputs(&[FIRST_SAFARI, PRIORITIES]),
            optional: inputs(&[BUDGET_BAND, COMFORT_LEVEL]),
            assumptions: &["The traveler has already visited the Masai Mara"],
            tradeoffs: &[
                ("Rare northern species", "Lower predator density"),
                ("Cultural encounters with Samburu communities", "Longer transfers"),
            ],
            change_conditions: &["The traveler has never been on safari"],
            refusal_triggers: &[],
        }
        .finish(),
        Draft {
            id: "safari_price_drop_wait",
            question: "Will safari prices drop if I wait to book a 2026 trip?",
            required: inputs(&[DATES_YEAR, BOOKING_LEAD_MONTHS, BUDGET_BAND]),
            optional: inputs(&[DATES_FLEXIBILITY, RISK_TOLERANCE]),
            assumptions: &["Travel is planned for high season"],
            tradeoffs: &[
                ("Possible last-minute discounts", "Best camps sell out early"),
                ("Time to compare operators", "Fewer flight options later"),
            ],
            change_conditions: &["Travel dates are fully flexible", "Booking within three months of travel"],
            refusal_triggers: &["Traveler asks for a guaranteed price drop"],
        }
        .finish(),
        Draft {
            id: "za_kruger_self_drive",
            question: "Is a self-drive Kruger safari a good idea for first-timers?",
            required: inputs(&[FIRST_SAFARI, COMFORT_LEVEL]),
            optional: inputs(&[TRIP_LENGTH_DAYS, PARTY_ADULTS]),
            assumptions: &["The traveler is comfortable driving on the left"],
            tradeoffs: &[
                ("Lowest cost way to see the Big Five", "No guide to find or explain sightings"),
                ("Total freedom of schedule", "Strict gate times"),
            ],
            change_conditions: &["The traveler will not drive abroad"],
            refusal_triggers: &[],
        }
        .finish(),
        Draft {
            id: "ug_gorilla_trek_rainy_season",
            question: "Is gorilla trekking in Uganda still worth it in the rainy season?",
            required: inputs(&[DATES_MONTH, RISK_TOLERANCE]),
            optional: inputs(&[MOBILITY_NOTES, BUDGET_BAND]),
            assumptions: &["A permit for Bwindi is available"],
            tradeoffs: &[
                ("Discounted low-season permits", "Muddy, steep trails"),
                ("Fewer trekkers", "Rain can cut photo time short"),
            ],
            change_conditions: &["Mobility limits make steep trails unsafe"],
            refusal_triggers: &["Traveler cannot hike for several hours"],
        }
        .finish(),
        Draft {
            id: "rw_vs_ug_gorilla_permits",
            question: "Rwanda vs Uganda for gorilla permits on a budget?",
            required: inputs(&[BUDGET_BAND, DATES_MONTH]),
            optional: inputs(&[TRIP_LENGTH_DAYS, MOBILITY_NOTES]),
            assumptions: &["One gorilla trek is planned"],
            tradeoffs: &[
                ("Rwanda's short transfer from Kigali", "Permits cost far more"),
                ("Uganda's cheaper permits", "Long drives to Bwindi"),
            ],
            change_conditions: &["Permit prices change"],
            refusal_triggers: &[],
        }
        .finish(),
        Draft {
            id: "tz_dry_season_crowds",
            question: "Are the dry season crowds in northern Tanzania a dealbreaker?",
            required: inputs(&[CROWD_TOLERANCE, DATES_MONTH]),
            optional: inputs(&[BUDGET_BAND, DATES_FLEXIBILITY]),
            assumptions: &["The itinerary includes Ngorongoro Crater"],
            tradeoffs: &[
                ("Reliable game viewing", "Queues of vehicles at sightings"),
                ("Dry roads", "Peak pricing"),
            ],
            change_conditions: &["Dates can move to the shoulder season"],
            refusal_triggers: &[],
        }
        .finish(),
        Draft {
            id: "zm_walking_safari",
            question: "Is a walking safari in South Luangwa right for a repeat visitor?",
            required: inputs(&[FIRST_SAFARI, MOBILITY_NOTES]),
            optional: inputs(&[DATES_MONTH]),
            assumptions: &["Walking season runs June to October"],
            tradeoffs: &[("Intimate tracking on foot", "Fewer big-game sightings per day")],
            change_conditions: &["Mobility limits rule out long walks"],
            refusal_triggers: &[],
        }
        .finish(),
    ];

    // Authored metadata and input overrides for topics migrated off text inference.
    for definition in &mut definitions {
        match definition.id.as_str() {
            "solo_safari_group_join" => {
                definition.metadata = TopicMetadata {
                    destinations: Some(strings(&["Tanzania", "Kenya", "South Africa"])),
                    time_context: None,
                    traveler_segments: Some(vec![
                        TravelerSegment::Solo,
                        TravelerSegment::BudgetConscious,
                    ]),
                    complexity: Some(DecisionComplexity::Conditional),
                };
            }
            "tz_dry_season_crowds" => {
                definition.metadata = TopicMetadata {
                    destinations: None,
                    time_context: Some(TimeContext {
                        month: Some("Aug".to_string()),
                        season: Some(Season::Dry),
                    }),
                    traveler_segments: Some(vec![TravelerSegment::FirstTime]),
                    complexity: Some(DecisionComplexity::Binary),
                };
            }
            "ke_repeat_safari_northern_kenya" | "za_kruger_self_drive" => {
                if let Some(input) = definition
                    .required_inputs
                    .iter_mut()
                    .find(|input| input.key == FIRST_SAFARI)
                {
                    input.overrides = InputOverrides {
                        label: Some("Previous safaris".to_string()),
                        description: Some(
                            "Whether the traveler has been on a guided safari before."
                                .to_string(),
                        ),
                        example: None,
                    };
                }
            }
            "zm_walking_safari" => {
                definition.published = false;
            }
            _ => {}
        }
    }

    definitions.push(
        Draft {
            id: "family_safari_first_time",
            question: "Is a first safari with children under ten a good idea?",
            required: inputs(&[PARTY_CHILDREN_AGES, PARTY_ADULTS, DESTINATIONS_CONSIDERED]),
            optional: inputs(&[MALARIA_CONCERN, ACCOMMODATION_STYLE, BUDGET_BAND]),
            assumptions: &["Lodges accept children under ten"],
            tradeoffs: &[
                ("Shared family memories", "Long game drives can be hard for young kids"),
                ("Family-friendly lodges with pools", "Private vehicle needed for flexible pacing"),
            ],
            change_conditions: &["Youngest child is under six"],
            refusal_triggers: &["Children's ages are unknown"],
        }
        .finish(),
    );

    definitions
}
