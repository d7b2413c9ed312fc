//! Simulate command.
//!
//! Runs one headless map session: mounts a surface on a
//! [`RecordingRenderer`], loads the provider file as the feed snapshot,
//! applies position, filters, theme and selection in the order a user
//! would, then reports what the map ended up showing.

use std::path::{Path, PathBuf};

use clap::Args;
use medmap::engine::MapEngine;
use medmap::filter::FilterSet;
use medmap::geo::{format_distance, round_to_tenth, Coordinates};
use medmap::mode::MapMode;
use medmap::provider::{load_providers_json, ProviderSnapshot, ProviderType};
use medmap::render::{ContainerId, RecordingRenderer, RenderCall};
use medmap::surface::MapTheme;
use serde_json::json;
use tracing::{info, warn};

use crate::error::CliError;
use crate::runner::CliRunner;

const CONTAINER: &str = "map";

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// JSON array of providers
    #[arg(long, value_name = "FILE")]
    pub providers: PathBuf,

    /// Map mode (providers, emergency, blood)
    #[arg(long, default_value = "providers")]
    pub mode: MapMode,

    /// User latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// User longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Restrict to a provider type (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<ProviderType>,

    /// Only providers open right now
    #[arg(long)]
    pub open_now: bool,

    /// Free-text search over name, address, specialty and type
    #[arg(long)]
    pub query: Option<String>,

    /// Filters as a URL query string (q=..&types=..&open_now=1)
    #[arg(long, conflicts_with_all = ["query", "types", "open_now"])]
    pub query_string: Option<String>,

    /// Provider id to select after filtering
    #[arg(long, value_name = "ID")]
    pub select: Option<String>,

    /// Tile theme
    #[arg(long)]
    pub theme: Option<MapTheme>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Per-kind count of recorded renderer calls.
#[derive(Debug, Default)]
struct CallSummary {
    total: usize,
    surfaces: usize,
    layers: usize,
    added: usize,
    updated: usize,
    removed: usize,
    camera: usize,
}

impl CallSummary {
    fn of(calls: &[RenderCall]) -> Self {
        let mut summary = Self {
            total: calls.len(),
            ..Self::default()
        };
        for call in calls {
            match call {
                RenderCall::CreateSurface(_) => summary.surfaces += 1,
                RenderCall::CreateClusterLayer(_) => summary.layers += 1,
                RenderCall::AddMarker { .. } => summary.added += 1,
                RenderCall::UpdateMarker { .. } => summary.updated += 1,
                RenderCall::RemoveMarker { .. } => summary.removed += 1,
                RenderCall::FlyTo { .. } => summary.camera += 1,
                _ => {}
            }
        }
        summary
    }
}

pub fn run(args: SimulateArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path)?;
    runner.log_startup("simulate");

    let entities = load_providers_json(&args.providers)?;
    let loaded = entities.len();
    info!(file = %args.providers.display(), loaded, "Loaded providers");

    let mut engine = MapEngine::new(RecordingRenderer::new(), runner.engine_config());
    engine.mount(ContainerId::new(CONTAINER));
    engine.navigate(args.mode);
    engine.set_snapshot(args.mode, ProviderSnapshot::new(1, entities));

    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let position = Coordinates::new(lat, lon);
        if !position.is_valid() {
            return Err(CliError::InvalidArgument(format!(
                "user position {} is out of range",
                position
            )));
        }
        engine.set_user_position(Some(position));
    }

    match &args.query_string {
        Some(query_string) => engine.apply_query_string(query_string),
        None => engine.set_filters(
            FilterSet::new(args.mode)
                .with_query(args.query.clone().unwrap_or_default())
                .with_types(args.types.iter().copied())
                .with_open_now(args.open_now),
        ),
    }

    if let Some(theme) = args.theme {
        engine.set_theme(theme);
    }

    if let Some(id) = args.select.as_deref() {
        let on_map = engine
            .select_provider(Some(id))
            .is_some_and(|change| change.camera_target.is_some());
        if !on_map {
            warn!(id, "Selected provider is not in the display set");
        }
    }

    if args.json {
        print_json(&engine, loaded)
    } else {
        print_text(&engine, loaded);
        Ok(())
    }
}

fn live_markers(engine: &MapEngine<RecordingRenderer>) -> usize {
    engine
        .active_layer()
        .map(|handle| engine.renderer().marker_ids(handle.layer).len())
        .unwrap_or(0)
}

fn print_text(engine: &MapEngine<RecordingRenderer>, loaded: usize) {
    let display = engine.display_set();

    println!(
        "Mode: {}  Theme: {}",
        engine.mode(),
        engine.lifecycle().theme()
    );
    println!("Providers: {} shown of {} loaded", display.len(), loaded);
    println!();

    for (position, entry) in display.iter().enumerate() {
        let distance = entry
            .distance_km
            .map(format_distance)
            .unwrap_or_else(|| "-".to_string());
        let marker = if entry.is_selected { "  [selected]" } else { "" };
        println!(
            "{:>3}. {:<24} {:<18} {:>9}  {}{}",
            position + 1,
            entry.id(),
            entry.entity.provider_type,
            distance,
            entry.entity.display_name,
            marker
        );
    }

    let skipped = engine.skipped();
    if !skipped.is_empty() {
        println!();
        println!("Skipped:");
        for entry in skipped {
            println!("  {}", entry);
        }
    }

    let query_string = engine.query_string();
    println!();
    if query_string.is_empty() {
        println!("Query string: (none)");
    } else {
        println!("Query string: ?{}", query_string);
    }

    let summary = CallSummary::of(engine.renderer().calls());
    println!(
        "Render calls: {} (surfaces {}, layers {}, markers +{} ~{} -{}, camera {})",
        summary.total,
        summary.surfaces,
        summary.layers,
        summary.added,
        summary.updated,
        summary.removed,
        summary.camera
    );
    println!("Live markers: {}", live_markers(engine));
}

fn print_json(engine: &MapEngine<RecordingRenderer>, loaded: usize) -> Result<(), CliError> {
    let display: Vec<_> = engine
        .display_set()
        .iter()
        .map(|entry| {
            json!({
                "id": entry.id(),
                "type": entry.entity.provider_type.as_str(),
                "name": entry.entity.display_name,
                "distance_km": entry.distance_km.map(round_to_tenth),
                "distance": entry.distance_km.map(format_distance),
                "selected": entry.is_selected,
            })
        })
        .collect();
    let skipped: Vec<String> = engine.skipped().iter().map(ToString::to_string).collect();
    let summary = CallSummary::of(engine.renderer().calls());

    let report = json!({
        "mode": engine.mode().as_str(),
        "theme": engine.lifecycle().theme().as_str(),
        "loaded": loaded,
        "display": display,
        "selected": engine.selection().selected_id(),
        "query_string": engine.query_string(),
        "skipped": skipped,
        "render": {
            "total": summary.total,
            "surfaces": summary.surfaces,
            "layers": summary.layers,
            "added": summary.added,
            "updated": summary.updated,
            "removed": summary.removed,
            "camera": summary.camera,
            "live_markers": live_markers(engine),
        },
    });

    let text = serde_json::to_string_pretty(&report).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
