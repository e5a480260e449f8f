use std::path::PathBuf;
use std::process;

use clap::Parser;
use framefit::common::config::{self, SettingKey};
use framefit::common::log;
use framefit::engine::TrimMode;
use framefit::host::scene;
use framefit::host::shell::RecordingShell;
use framefit::host::storage::{FileStore, MemoryStore, SettingsStore};
use framefit::model::SceneNode;
use framefit::server::{Controller, UiRequest};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "framefit")]
#[command(about = "Resize container frames in a scene file to fit their visible content")]
struct Cli {
    /// Scene file with the selected nodes as a JSON array
    scene: PathBuf,

    /// Trim mode for this run: all, left, right, top or bottom
    #[arg(long)]
    mode: Option<TrimMode>,

    /// Pixels kept between content and each trimmed edge
    #[arg(long)]
    padding: Option<f64>,

    /// Target gap in pixels when collapsing
    #[arg(long)]
    gap: Option<f64>,

    /// Collapse only the final gap along the primary axis
    #[arg(long)]
    remove_last_gap: Option<bool>,

    /// Collapse every gap along the primary axis
    #[arg(long)]
    remove_all_gaps: Option<bool>,

    /// Settings file to read and update
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Keep settings in memory only, leaving the settings file untouched
    #[arg(long)]
    ephemeral: bool,

    /// Write the updated scene here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    log::init_logging();

    let mut selection: Vec<SceneNode> = match scene::read_scene(&cli.scene) {
        Ok(nodes) => nodes,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.scene.display(), e);
            process::exit(1);
        }
    };

    if cli.ephemeral {
        run(Controller::new(MemoryStore::default()), &cli, &mut selection);
    } else {
        let path = cli.settings.clone().unwrap_or_else(config::settings_file);
        let store = match FileStore::open(&path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Failed to open settings at {}: {}", path.display(), e);
                process::exit(1);
            }
        };
        run(Controller::new(store), &cli, &mut selection);
    }
}

fn run<S: SettingsStore>(mut controller: Controller<S>, cli: &Cli, selection: &mut Vec<SceneNode>) {
    let request = resize_request(&controller, cli);
    let mut shell = RecordingShell::default();
    controller.handle(request, selection, &mut shell);

    for notice in &shell.notices {
        eprintln!("{notice}");
    }

    match &cli.output {
        Some(path) => {
            if let Err(e) = scene::write_scene(path, selection) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => println!("{}", serde_json::to_string_pretty(selection).unwrap()),
    }
}

/// Folds command-line overrides over the stored settings. Values the user
/// did not pass ride through unchanged, so they are not rewritten.
fn resize_request<S: SettingsStore>(controller: &Controller<S>, cli: &Cli) -> UiRequest {
    let current = |key: SettingKey| controller.settings().value(key).to_json();
    UiRequest::Resize {
        mode: cli
            .mode
            .map_or_else(|| current(SettingKey::Mode), |m| Value::from(m.to_string())),
        padding: cli.padding.map_or_else(|| current(SettingKey::Padding), Value::from),
        gap: cli.gap.map_or_else(|| current(SettingKey::Gap), Value::from),
        remove_last_gap: cli
            .remove_last_gap
            .map_or_else(|| current(SettingKey::RemoveLastGap), Value::from),
        remove_all_gaps: cli
            .remove_all_gaps
            .map_or_else(|| current(SettingKey::RemoveAllGaps), Value::from),
    }
}
