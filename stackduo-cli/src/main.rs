mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use output::{render_reports, OutputFormat};
use stackduo_engine::{run_task, TaskReport};
use stackduo_types::{Dataset, Task};

/// stackduo
///
/// Computes the StackExchange reports twice, with SQLite and with an
/// in-memory pipeline, and checks that both agree.
#[derive(Parser, Debug)]
#[command(name = "stackduo")]
#[command(about = "Run dual-path StackExchange reports", long_about = None)]
struct Args {
    /// Path to the JSON dataset (Users, Posts, Comments, PostLinks)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Task number (1-5) or name; repeat for several. Defaults to all
    #[arg(short, long = "task", value_parser = parse_task)]
    tasks: Vec<Task>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Fail if any report's two paths disagree
    #[arg(long)]
    strict: bool,
}

fn parse_task(s: &str) -> Result<Task, String> {
    Task::parse(s).ok_or_else(|| format!("unknown task '{}' (expected 1-5 or a task name)", s))
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let dataset = Dataset::from_json(&json)
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        users = dataset.users.len(),
        posts = dataset.posts.len(),
        comments = dataset.comments.len(),
        post_links = dataset.post_links.len(),
        total = dataset.row_count(),
        "Dataset loaded"
    );
    Ok(dataset)
}

fn run(tasks: &[Task], dataset: &Dataset) -> Result<Vec<TaskReport>> {
    tasks
        .iter()
        .map(|task| run_task(*task, dataset).with_context(|| format!("Failed to run {}", task)))
        .collect()
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    let settings = config::Settings::new().context("Failed to load settings")?;

    // Logs go to stderr so stdout carries only the reports
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let dataset_path = args
        .dataset
        .unwrap_or_else(|| PathBuf::from(&settings.dataset.path));
    let dataset = load_dataset(&dataset_path)?;

    let tasks = if args.tasks.is_empty() {
        Task::ALL.to_vec()
    } else {
        args.tasks
    };
    let reports = run(&tasks, &dataset)?;

    match args.format.unwrap_or(settings.output.format) {
        OutputFormat::Table => print!("{}", render_reports(&reports)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    let disagreements = reports.iter().filter(|r| !r.agrees).count();
    if disagreements > 0 {
        tracing::warn!("{} of {} reports disagree", disagreements, reports.len());
        if args.strict {
            anyhow::bail!("{} of {} reports disagree", disagreements, reports.len());
        }
    }

    Ok(())
}
