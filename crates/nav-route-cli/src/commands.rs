//! Command implementations
//!
//! Every command reads route documents, runs one library query and writes its result.

use crate::settings::Command;
use anyhow::{Context, Result};
use nav_route_lib::{Route, geo_utils, gpx_export};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Load a route document from disk
pub fn load_route(path: &Path) -> Result<Route> {
    let file = File::open(path).with_context(|| format!("Opening {}", path.display()))?;
    let route: Route = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Parsing route document {}", path.display()))?;
    tracing::info!(
        "Loaded {} with {} segments ({:.1}m)",
        path.display(),
        route.len(),
        route.distance()
    );
    Ok(route)
}

/// Open the output target, stdout when no path is given
fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    })
}

fn coord_json(coord: geo::Coord<f64>) -> Value {
    json!({ "lat": coord.y, "lon": coord.x })
}

/// Run a command and return its JSON result, if it produces one on stdout
pub fn run(command: Command) -> Result<Option<Value>> {
    match command {
        Command::Info { route } => {
            let route = load_route(&route)?;
            let validation = match route.validate() {
                Ok(()) => Value::Null,
                Err(err) => {
                    tracing::warn!("Route fails validation: {}", err);
                    Value::String(err.to_string())
                }
            };
            let bbox = route.bounding_box().map(|bbox| {
                json!({ "min": coord_json(bbox.min()), "max": coord_json(bbox.max()) })
            });
            Ok(Some(json!({
                "segments": route.len(),
                "waypoints": route.waypoints().count(),
                "vehicle": route.vehicle(),
                "distance": route.distance(),
                "time": route.has_time().then_some(route.time()),
                "geodesic_length": route.geodesic_length(),
                "created": route.created().to_rfc3339(),
                "bounding_box": bbox,
                "validation_error": validation,
            })))
        }

        Command::Position { route, distance } => {
            let route = load_route(&route)?;
            let position = route.position_after_distance(distance);
            if position.is_none() {
                tracing::info!("Distance {:.1}m is beyond the end of the route", distance);
            }
            Ok(Some(json!({
                "distance": distance,
                "position": position.map(coord_json),
            })))
        }

        Command::Project { route, lat, lon } => {
            let route = load_route(&route)?;
            let projection = route
                .project(geo_utils::coord(lat, lon))
                .context("Projecting coordinate")?;
            Ok(Some(json!({
                "position": coord_json(projection.coord),
                "segment_index": projection.segment_index,
                "distance": projection.distance,
                "time": projection.time,
                "offset": projection.offset,
            })))
        }

        Command::Sample { route, interval } => {
            let route = load_route(&route)?;
            let samples = route.samples(interval)?;
            let positions: Vec<Value> = samples.into_iter().map(coord_json).collect();
            tracing::debug!("Produced {} samples every {}m", positions.len(), interval);
            Ok(Some(json!({
                "interval": interval,
                "positions": positions,
            })))
        }

        Command::Concat {
            first,
            second,
            output,
        } => {
            let first = load_route(&first)?;
            let second = load_route(&second)?;
            let joined = first
                .concat_owned(second)
                .context("Concatenating routes")?;

            let mut writer = open_output(output.as_deref())?;
            serde_json::to_writer(&mut writer, &joined).context("Writing route document")?;
            writeln!(writer)?;
            writer.flush()?;
            Ok(None)
        }

        Command::ExportGpx { route, output } => {
            let route = load_route(&route)?;
            let gpx = gpx_export::to_gpx(&route);

            let mut writer = open_output(output.as_deref())?;
            gpx::write(&gpx, &mut writer).context("Writing GPX document")?;
            writer.flush()?;
            Ok(None)
        }
    }
}
