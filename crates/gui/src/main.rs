mod app;
mod planner;
mod ui;
mod viewport;

// Re-export library modules so that `crate::build`, `crate::plan`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use roomplan_gui_lib::build;
pub use roomplan_gui_lib::export;
pub use roomplan_gui_lib::plan;
pub use roomplan_gui_lib::state;

use std::path::PathBuf;

use app::RoomPlanApp;
use state::{AppState, CatalogState};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomplan_gui=info".into()),
        )
        .init();

    let state = initial_state();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("RoomPlan — Furniture Layout")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "roomplan-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(RoomPlanApp::new(cc, state)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// Build the starting state from command line arguments:
/// `--catalog <path>`, `--room <WxL>`, `--add <item-id>` (repeatable).
fn initial_state() -> AppState {
    let args: Vec<String> = std::env::args().collect();
    let mut catalog_path: Option<PathBuf> = None;
    let mut room: Option<shared::RoomSpec> = None;
    let mut add_ids: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" if i + 1 < args.len() => {
                catalog_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--room" if i + 1 < args.len() => {
                match parse_room_arg(&args[i + 1]) {
                    Ok(spec) => room = Some(spec),
                    Err(e) => tracing::error!("Ignoring --room {}: {e}", args[i + 1]),
                }
                i += 1;
            }
            "--add" if i + 1 < args.len() => {
                add_ids.push(args[i + 1].clone());
                i += 1;
            }
            other => tracing::warn!("Unknown argument: {other}"),
        }
        i += 1;
    }

    let catalog = CatalogState::load_or_demo(catalog_path.as_deref());
    let room = room.unwrap_or_default();
    let mut state = AppState::new(catalog, room);

    for id in add_ids {
        match state.catalog.resolve(&id) {
            Some(item) => {
                state.layout.place(item, plan::PlanPos::CENTER);
                tracing::info!("Placed {id} from the command line");
            }
            None => tracing::warn!("Unknown catalog item: {id}"),
        }
    }

    state
}

/// Parse a `WxL` room size such as `6x5` or `4.5x3.2` (meters).
fn parse_room_arg(arg: &str) -> Result<shared::RoomSpec, String> {
    let (w, l) = arg
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WxL, e.g. 6x5".to_string())?;
    let width: f64 = w.trim().parse().map_err(|_| format!("bad width {w:?}"))?;
    let length: f64 = l.trim().parse().map_err(|_| format!("bad length {l:?}"))?;
    shared::RoomSpec::new(width, length).map_err(|e| e.to_string())
}
