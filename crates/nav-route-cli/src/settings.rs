use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Navigation route inspector - query precomputed routes stored as JSON documents
pub struct Settings {
    /// Log filter used when RUST_LOG is not set (e.g. "debug" or "nav_route_lib=trace")
    #[clap(long, env = "NAV_ROUTE_LOG", default_value = "info")]
    pub log_level: String,

    /// Pretty-print JSON output
    #[clap(long)]
    pub pretty: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Summarize a route and check its invariants
    Info {
        /// Route document
        route: PathBuf,
    },

    /// Position reached after travelling a distance along the route
    Position {
        route: PathBuf,

        /// Distance from the start in meters
        #[clap(short, long)]
        distance: f64,
    },

    /// Project a coordinate onto the route
    Project {
        route: PathBuf,

        #[clap(long, allow_hyphen_values = true)]
        lat: f64,

        #[clap(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Positions every INTERVAL meters along the route
    Sample {
        route: PathBuf,

        /// Sampling interval in meters
        #[clap(short, long, env = "NAV_ROUTE_SAMPLE_INTERVAL", default_value = "100.0")]
        interval: f64,
    },

    /// Join two routes sharing an endpoint
    Concat {
        first: PathBuf,
        second: PathBuf,

        /// Output file (stdout when omitted)
        #[clap(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a route to GPX
    ExportGpx {
        route: PathBuf,

        /// Output file (stdout when omitted)
        #[clap(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
