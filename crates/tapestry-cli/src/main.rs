use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tapestry_core::app::{
    BuildSettings, ConstructorStyle, ProjectBuilder, TaskReports, configure_reports, summarize,
};
use tapestry_core::domain::report::SimpleReport;
use tapestry_core::impls::{DeprecationLogger, ReportLayout, TracingDecorator, TypedInstantiator};
use tapestry_core::ports::Instantiator;

/// Configure task reports from a settings file and print them as JSON.
#[derive(Debug, Parser)]
#[command(name = "tapestry", version, about = "Inspect task report configuration")]
struct Cli {
    /// TOML settings file; built-in defaults are used when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Build containers through the deprecated constructor.
    #[arg(long)]
    legacy: bool,
}

fn run(cli: Cli) -> Result<Vec<TaskReports>, Box<dyn std::error::Error>> {
    let settings = match &cli.settings {
        Some(path) => BuildSettings::from_file(path)?,
        None => BuildSettings::default(),
    };

    let deprecations = Arc::new(DeprecationLogger::new(settings.deprecation));
    let mut instantiator = TypedInstantiator::new();
    instantiator.register::<SimpleReport, _>(ReportLayout::standard().into_constructor())?;

    let project = ProjectBuilder::from_settings(&settings)
        .deprecation(deprecations.clone())
        .service::<dyn Instantiator>(Arc::new(instantiator))
        .expect_service::<dyn Instantiator>()
        .build()?;

    let style = if cli.legacy {
        ConstructorStyle::Legacy
    } else {
        ConstructorStyle::Current
    };

    let mut summaries = Vec::with_capacity(settings.tasks.len());
    for task_settings in &settings.tasks {
        let task = project.create_task(task_settings.name.clone());
        let decorator = Arc::new(TracingDecorator::new(task.path()));
        let reports = configure_reports(&task, task_settings, decorator, style)?;
        info!(task = task.path(), enabled = reports.enabled().count(), "reports configured");
        summaries.push(summarize(&reports));
    }

    deprecations.check()?;
    Ok(summaries)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,tapestry_core=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(summaries) => match serde_json::to_string_pretty(&summaries) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("failed to render reports: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
