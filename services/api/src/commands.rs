use clap::Args;
use decision_bridge::config::AppConfig;
use decision_bridge::contract::TrackingContext;
use decision_bridge::error::AppError;
use decision_bridge::topics::{infer_metadata, TopicMetadata};
use decision_bridge::bridge::verify_content;
use decision_bridge::DecisionBridge;
use serde::Serialize;

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Include unpublished drafts
    #[arg(long)]
    pub(crate) all: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ContractArgs {
    /// Topic slug
    pub(crate) slug: String,
    #[arg(long)]
    pub(crate) session_id: Option<String>,
    #[arg(long)]
    pub(crate) traveler_id: Option<String>,
    #[arg(long)]
    pub(crate) lead_id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct RecoveryArgs {
    /// Topic slug
    pub(crate) slug: String,
    /// Refusal reason as returned by the decision engine
    #[arg(long)]
    pub(crate) reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct BackfillEntry {
    id: String,
    metadata: TopicMetadata,
}

fn load_bridge() -> Result<DecisionBridge, AppError> {
    let config = AppConfig::load()?;
    DecisionBridge::load(&config.content)
}

fn render_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", render_json(value)?);
    Ok(())
}

pub(crate) fn list_topics(args: ListArgs) -> Result<(), AppError> {
    let bridge = load_bridge()?;
    let index = bridge.index();

    println!("Compiled topics");
    for definition in bridge.definitions().iter() {
        let Some(record) = index.by_id(&definition.id) else {
            continue;
        };
        if !record.published && !args.all {
            continue;
        }
        let marker = if record.published { "" } else { " (draft)" };
        println!("- {}{}", record.slug, marker);
        println!("    {}", record.question);
        println!(
            "    {} | outcomes: {} | confidence {:.2}-{:.2}",
            record.context_line,
            record
                .eligible_outcomes
                .iter()
                .map(|outcome| outcome.label())
                .collect::<Vec<_>>()
                .join("/"),
            record.confidence_range[0],
            record.confidence_range[1]
        );
    }

    if !bridge.warnings().is_empty() {
        println!("\nCompile warnings");
        for warning in bridge.warnings() {
            println!("- {}: {}", warning.topic_id, warning.warning);
        }
    }
    Ok(())
}

pub(crate) fn show_topic(slug: &str) -> Result<(), AppError> {
    let bridge = load_bridge()?;
    print_json(bridge.topic(slug)?)
}

pub(crate) fn backfill_metadata() -> Result<(), AppError> {
    let bridge = load_bridge()?;
    let entries: Vec<BackfillEntry> = bridge
        .definitions()
        .iter()
        .filter(|definition| definition.metadata == TopicMetadata::default())
        .map(|definition| BackfillEntry {
            id: definition.id.clone(),
            metadata: infer_metadata(&definition.id, &definition.question),
        })
        .collect();
    print_json(&entries)
}

pub(crate) fn verify_topics() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let report = verify_content(&config.content)?;
    print!("{report}");

    if report.is_clean() {
        Ok(())
    } else {
        Err(AppError::Verification {
            issues: report.issues.len(),
        })
    }
}

pub(crate) fn print_contract(args: ContractArgs) -> Result<(), AppError> {
    let bridge = load_bridge()?;
    let tracking = TrackingContext {
        session_id: args.session_id,
        traveler_id: args.traveler_id,
        lead_id: args.lead_id,
    };
    print_json(&bridge.contract(&args.slug, tracking)?)
}

pub(crate) fn print_recovery(args: RecoveryArgs) -> Result<(), AppError> {
    let bridge = load_bridge()?;
    let recovery = bridge.recovery(&args.slug, args.reason.as_deref())?;

    println!(
        "Refusal recovery for {} (reason: {})",
        args.slug,
        recovery.matched_reason.as_deref().unwrap_or("unrecognized")
    );
    println!("{}", recovery.safe_next_step);
    println!("\nInputs to collect");
    for input in &recovery.missing_inputs {
        println!("- {} ({}): {}", input.label, input.key, input.description);
    }
    println!("\nExample payload\n{}", recovery.example_snippet);
    Ok(())
}
