//! CLI entrypoint for the council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::Parser;
use council_application::{
    CouncilParams, MemoryParticipationStore, NoOutput, OutputAdapter, ParticipationStore,
    RunCouncilInput, RunCouncilOutcome, RunCouncilUseCase, SelectRosterUseCase,
};
use council_domain::Severity;
use council_infrastructure::{
    ConfigLoader, FileConfig, FileParticipationStore, HeuristicSynthesizer, MarkdownReportWriter,
    ScriptedPerspectiveProvider,
};
use council_presentation::{Cli, ConsoleAdapter, ConsoleFormatter, OutputFormat};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    // Validation: warnings are reported, errors stop before any session
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("config: {}", issue.message),
            Severity::Error => eprintln!("config error: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Configuration is invalid; fix the errors above");
    }

    let topic_text = match &cli.topic {
        Some(t) => t.clone(),
        None => bail!("A topic is required. Run `council --help` for usage."),
    };

    let catalog = config.catalog().context("Failed to build agent catalog")?;
    let mapping = config.mapping();
    let mut params: CouncilParams = config.params();
    if let Some(rounds) = cli.rounds {
        params.max_rounds = rounds;
    }
    if cli.devils_advocate {
        params.devils_advocate = true;
    }

    let mut topic = council_domain::Topic::try_new(topic_text.clone())
        .context("The topic must not be empty")?;
    if let Some(context) = &cli.context {
        topic = topic.with_context(context.clone());
    }

    let mut input = RunCouncilInput::new(topic)
        .with_params(params)
        .with_visibility(cli.visibility.into())
        .with_strategy(cli.strategy.into());
    if let Some(roster) = cli.roster_override() {
        input = input.with_manual_roster(roster);
    }
    if let Some(domain) = &cli.domain {
        input = input.with_domain(domain.clone());
    }

    info!("Starting council session");

    let output: Box<dyn OutputAdapter> = if cli.quiet {
        Box::new(NoOutput)
    } else {
        Box::new(ConsoleAdapter::new(cli.visibility.into()))
    };

    // Dry runs keep everything in memory: no ledger writes, no report files
    let outcome = if cli.dry_run {
        let store = Arc::new(MemoryParticipationStore::default());
        run_session(catalog, mapping, store, input, output.as_ref()).await?
    } else {
        let store = Arc::new(
            FileParticipationStore::at_default_location()
                .context("Could not determine the platform data directory")?,
        );
        let outcome = run_session(catalog, mapping, store, input, output.as_ref()).await?;
        write_report(&cli, &config, &outcome)?;
        outcome
    };

    let formatted = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", formatted);

    Ok(())
}

async fn run_session<S: ParticipationStore + 'static>(
    catalog: council_domain::AgentCatalog,
    mapping: council_domain::DomainMapping,
    store: Arc<S>,
    input: RunCouncilInput,
    output: &dyn OutputAdapter,
) -> Result<RunCouncilOutcome> {
    let selector = SelectRosterUseCase::new(catalog, mapping, store);
    let use_case = RunCouncilUseCase::new(
        Arc::new(ScriptedPerspectiveProvider),
        Arc::new(HeuristicSynthesizer),
        selector,
    );
    Ok(use_case.execute_with_output(input, output).await?)
}

fn write_report(cli: &Cli, config: &FileConfig, outcome: &RunCouncilOutcome) -> Result<()> {
    if cli.no_report || !config.output.write_reports {
        return Ok(());
    }
    let directory = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone().into());
    let writer = MarkdownReportWriter::new(directory);
    let path = writer
        .write(&outcome.session, &outcome.synthesis, &outcome.quality)
        .context("Failed to write the session report")?;
    if !cli.quiet {
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn print_config_sources() {
    println!("Configuration sources (in priority order):");

    if let Some(path) = ConfigLoader::project_config_path() {
        println!("  [FOUND] Project: {}", path.display());
    } else {
        println!("  [     ] Project: ./council.toml or ./.council.toml");
    }

    if let Some(path) = ConfigLoader::global_config_path() {
        if path.exists() {
            println!("  [FOUND] Global:  {}", path.display());
        } else {
            println!("  [     ] Global:  {}", path.display());
        }
    }

    println!("  [     ] Default: built-in defaults");
}
