use std::fs;
use std::path::PathBuf;

use clap::Parser;
use guides::anchor::Anchor;
use guides::camera::Camera;
use guides::config::{ConfigError, GuidelineConfig};
use guides::doc::BoardObject;
use guides::engine::EngineCore;
use guides::input::{InputState, Modifiers};
use guides::resize::ResizeMode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid guideline config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid zoom: {0} (must be finite and > 0)")]
    InvalidZoom(f64),
    #[error("step {step} references unknown object {id}")]
    UnknownObject { step: usize, id: Uuid },
}

#[derive(Parser, Debug)]
#[command(name = "guides-replay", about = "Replay a drag/resize script and print the active guides per step")]
struct Cli {
    /// Path to the JSON script.
    script: PathBuf,

    /// Override the snap margin in screen pixels.
    #[arg(long, env = "GUIDES_MARGIN")]
    margin: Option<f64>,

    /// Show guides without pulling objects onto them.
    #[arg(long)]
    no_magnetic: bool,
}

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    config: GuidelineConfig,
    #[serde(default = "unit_zoom")]
    zoom: f64,
    #[serde(default)]
    resize_mode: ResizeMode,
    objects: Vec<BoardObject>,
    steps: Vec<Step>,
}

fn unit_zoom() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Step {
    Move {
        id: Uuid,
        dx: f64,
        dy: f64,
    },
    Resize {
        id: Uuid,
        handle: Anchor,
        dx: f64,
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Release,
    Undo,
    Redo,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Resize { .. } => "resize",
            Self::Release => "release",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.script)?;
    let script: Script = serde_json::from_str(&raw)?;
    if !script.zoom.is_finite() || script.zoom <= 0.0 {
        return Err(ReplayError::InvalidZoom(script.zoom));
    }

    let mut config = script.config;
    if let Some(margin) = cli.margin {
        config.margin = margin;
    }
    if cli.no_magnetic {
        config.magnetic = false;
    }

    let mut core = EngineCore::default();
    core.enable_guidelines(config)?;
    core.set_camera(Camera { zoom: script.zoom, ..Camera::default() });
    core.resize_mode = script.resize_mode;
    core.open_surface(Uuid::new_v4(), script.objects);
    info!(steps = script.steps.len(), "replay: starting");

    for (index, step) in script.steps.iter().enumerate() {
        run_step(&mut core, index, step)?;
        core.render();

        let guides = core.guides();
        let line = json!({
            "step": index,
            "op": step.name(),
            "vertical": guides.vertical_positions(),
            "horizontal": guides.horizontal_positions(),
            "strokes": core.overlay.stroke_count(),
            "objects": core.board.doc.snapshot(),
        });
        println!("{line}");
    }
    Ok(())
}

fn run_step(core: &mut EngineCore, step: usize, op: &Step) -> Result<(), ReplayError> {
    match *op {
        Step::Move { id, dx, dy } => {
            let dragging = matches!(core.input, InputState::DraggingObject { id: current, .. } if current == id);
            if !dragging && !core.begin_drag(id) {
                return Err(ReplayError::UnknownObject { step, id });
            }
            core.drag_by(dx, dy);
        }
        Step::Resize { id, handle, dx, dy, modifiers } => {
            let resizing = matches!(
                &core.input,
                InputState::ResizingObject { gesture, orig, .. } if orig.id == id && gesture.handle == handle
            );
            if !resizing && !core.begin_resize(id, handle, modifiers) {
                return Err(ReplayError::UnknownObject { step, id });
            }
            core.resize_by(dx, dy);
        }
        Step::Release => {
            core.release();
        }
        Step::Undo => {
            core.undo();
        }
        Step::Redo => {
            core.redo();
        }
    }
    debug!(step, op = op.name(), "replay: step applied");
    Ok(())
}
