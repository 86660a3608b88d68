use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use manga_canvas::bubble::BubbleShape;
use manga_canvas::config::CanvasConfig;
use manga_canvas::controller::{Action, WorkspaceController};
use manga_canvas::doc::Project;
use manga_canvas::error::CanvasError;
use manga_canvas::script;
use manga_canvas::store::CanvasStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

#[derive(Parser, Debug)]
#[command(name = "manga-canvas", about = "Replay canvas input scripts and render bubble outlines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON event script and print the resulting project.
    Replay {
        script: PathBuf,
        /// Start from this project file instead of a new one.
        #[arg(long)]
        project: Option<PathBuf>,
        #[arg(long, default_value = "Untitled")]
        name: String,
        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },
    /// Print the SVG path of a dialogue bubble.
    Bubble {
        #[arg(long)]
        no_tail: bool,
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        tail_angle: f64,
        #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
        tail_length: f64,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay { script, project, name, compact } => run_replay(&script, project.as_deref(), name, compact),
        Command::Bubble { no_tail, tail_angle, tail_length } => {
            let shape = BubbleShape { has_tail: !no_tail, tail_angle, tail_length };
            println!("{}", shape.path());
            Ok(())
        }
    }
}

fn run_replay(
    script_path: &Path,
    project_path: Option<&Path>,
    name: String,
    compact: bool,
) -> Result<(), CliError> {
    let config = CanvasConfig::from_env()?;
    let project = match project_path {
        Some(path) => Project::from_json(&read(path)?)?,
        None => Project::new(name),
    };
    let events = script::parse_script(&read(script_path)?)?;

    let mut store = CanvasStore::with_config(project, config);
    let mut controller = WorkspaceController::new();
    let actions = script::replay(&mut store, &mut controller, &events)?;

    let created = actions.iter().filter(|a| matches!(a, Action::ElementCreated(_))).count();
    let removed: usize = actions
        .iter()
        .map(|a| match a {
            Action::ElementsRemoved(ids) => ids.len(),
            _ => 0,
        })
        .sum();
    tracing::info!(events = events.len(), created, removed, "script applied");

    let project = store.into_project();
    let json = if compact { project.to_json()? } else { project.to_json_pretty()? };
    println!("{json}");
    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}
