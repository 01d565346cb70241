//! `soapdrill` application entry point.
//!
//! This binary is a terminal front end for the SOAP failure trainer. It uses
//! `eyre` for opaque error handling at the application boundary, converting
//! domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/soapdrill/config.toml` or path from `SOAPDRILL_CONFIG_PATH`)
//! 3. Environment variables (`SOAPDRILL_*`)
//! 4. Command-line arguments

use camino::Utf8Path;
use clap::Parser;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;
use soapdrill::api::{self, DiskSession, RunReport};
use soapdrill::authoring::{ScenarioDraft, TagList};
use soapdrill::config::{
    AddArgs, AppConfig, Cli, Commands, ListArgs, RunArgs, ShowArgs, load_config,
};
use soapdrill::error::Result as SoapdrillResult;
use soapdrill::filter::{CategoryFilter, DifficultyFilter, ScenarioQuery};
use soapdrill::scenario::Scenario;
use soapdrill::transfer;
use soapdrill::workbench::Workbench;

/// Application entry point.
///
/// Loads configuration, opens the scenario store, then dispatches to the
/// subcommand on a single-threaded Tokio runtime.
fn main() -> EyreResult<()> {
    soapdrill::logging::init();

    let cli = Cli::parse();
    let config = load_config(&cli).map_err(Report::from)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run(&cli, &config)).map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`.
async fn run(cli: &Cli, config: &AppConfig) -> SoapdrillResult<()> {
    let mut session = api::open_session(config, &DefaultEnv::new())?;
    match &cli.command {
        Commands::List(args) => list(&mut session, args),
        Commands::Show(args) => show(&session, args),
        Commands::Run(args) => run_scenario(&mut session, args).await,
        Commands::Add(args) => add(&mut session, args),
        Commands::Export(args) => export(&session, &args.dir, &config.export.file_name),
        Commands::Import(args) => import(&mut session, &args.file),
        Commands::Reset => reset(&mut session),
    }
}

fn query_from(args: &ListArgs) -> ScenarioQuery {
    ScenarioQuery {
        text: args.search.clone().unwrap_or_default(),
        category: args
            .category
            .map_or(CategoryFilter::All, CategoryFilter::Only),
        difficulty: args
            .difficulty
            .map_or(DifficultyFilter::All, DifficultyFilter::Only),
    }
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
#[expect(
    clippy::unnecessary_wraps,
    reason = "uniform handler signature for dispatch"
)]
fn list(session: &mut DiskSession, args: &ListArgs) -> SoapdrillResult<()> {
    let scenarios = api::list(session, query_from(args));
    if scenarios.is_empty() {
        println!("No scenarios match.");
        return Ok(());
    }
    for scenario in &scenarios {
        println!(
            "{:<26} {:<13} {:<24} {}",
            scenario.id, scenario.difficulty, scenario.category, scenario.name
        );
    }
    println!("{} of {} scenarios", scenarios.len(), session.store().len());
    Ok(())
}

fn show(session: &DiskSession, args: &ShowArgs) -> SoapdrillResult<()> {
    let scenario = api::show(session, &args.id)?;
    print_scenario(&scenario);
    if args.explain {
        print_explanation(scenario.explanation.as_deref());
    }
    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_scenario(scenario: &Scenario) {
    println!("{} ({})", scenario.name, scenario.id);
    println!("{}", scenario.description);
    println!("Category:   {}", scenario.category);
    println!("Difficulty: {}", scenario.difficulty);
    if !scenario.tags.is_empty() {
        println!("Tags:       {}", scenario.tags.join(", "));
    }
    println!();
    println!("Request:");
    println!("{}", scenario.request_xml);
}

async fn run_scenario(session: &mut DiskSession, args: &RunArgs) -> SoapdrillResult<()> {
    let report = api::run(session, &args.id, args.resolve).await?;
    print_report(&report, args.explain);
    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_explanation(explanation: Option<&str>) {
    println!();
    println!(
        "Explanation: {}",
        explanation.unwrap_or("none recorded for this scenario")
    );
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_report(report: &RunReport, explain: bool) {
    println!("{} ({})", report.scenario.name, report.scenario.id);
    println!();
    println!("Request:");
    println!("{}", report.run.content());
    print_response(&report.run);

    if let Some(resolved) = &report.resolved {
        println!();
        println!("Fixed request:");
        println!("{}", resolved.content());
        print_response(resolved);
    } else if report.run.resolve_offered() {
        println!();
        println!("A fix is available; rerun with --resolve to apply it.");
    }
    if explain {
        print_explanation(report.run.explanation());
    }
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_response(workbench: &Workbench) {
    println!();
    let label = workbench.response_label();
    let Some(outcome) = workbench.outcome() else {
        println!("Response: {label}");
        return;
    };
    println!(
        "Response: {label} (status {}, {} ms)",
        outcome.status_code,
        outcome.latency.as_millis()
    );
    if let Some(error) = &outcome.error {
        println!("{error}");
    }
    println!("{}", outcome.xml);
}

fn read_optional(path: Option<&Utf8Path>, fallback: &str) -> SoapdrillResult<String> {
    path.map_or_else(|| Ok(fallback.to_owned()), transfer::read_document)
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn add(session: &mut DiskSession, args: &AddArgs) -> SoapdrillResult<()> {
    let base = if args.templates {
        ScenarioDraft::with_templates()
    } else {
        ScenarioDraft::default()
    };
    let draft = ScenarioDraft {
        name: args.name.clone(),
        description: args.description.clone(),
        category: args.category,
        difficulty: args.difficulty,
        request_xml: read_optional(args.request_file.as_deref(), &base.request_xml)?,
        response_xml: read_optional(args.response_file.as_deref(), &base.response_xml)?,
        error_xml: read_optional(args.error_file.as_deref(), &base.error_xml)?,
        fixed_request_xml: read_optional(
            args.fixed_request_file.as_deref(),
            &base.fixed_request_xml,
        )?,
        explanation: args.explanation.clone().unwrap_or_default(),
        tags: args.tags.iter().collect::<TagList>(),
    };
    let scenario = api::add(session, draft)?;
    println!("Added {} ({})", scenario.name, scenario.id);
    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn export(session: &DiskSession, dir: &Utf8Path, file_name: &str) -> SoapdrillResult<()> {
    let path = api::export(session, dir, file_name)?;
    println!("Exported {} scenarios to {path}", session.store().len());
    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn import(session: &mut DiskSession, path: &Utf8Path) -> SoapdrillResult<()> {
    let count = api::import(session, path)?;
    println!("Imported {count} scenarios from {path}");
    if !session.store().is_persistent() {
        println!("Warning: the scenario store could not be saved; changes are not persisted.");
    }
    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
#[expect(
    clippy::unnecessary_wraps,
    reason = "uniform handler signature for dispatch"
)]
fn reset(session: &mut DiskSession) -> SoapdrillResult<()> {
    let count = api::reset(session);
    println!("Restored {count} bundled scenarios");
    Ok(())
}
