//! `routekit` command line tool.
//!
//! Offline tooling for a route table file:
//!
//! ```text
//! routekit check                      validate the table
//! routekit routes [--json]            list routes in match order
//! routekit match /articles/7          resolve a path
//! routekit url article id=7 slug=hi   build a URL by route name
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use routekit::config::{load_config, ObservabilityConfig};
use routekit::observability::init_logging;
use routekit::routing::{Params, Route, Router};
use routekit::RequestPath;

#[derive(Parser)]
#[command(name = "routekit")]
#[command(about = "Inspect and exercise a routekit route table", long_about = None)]
struct Cli {
    /// Route table to load.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Log filter, overridden by RUST_LOG.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table
    Check,
    /// List routes in registration (match) order
    Routes {
        #[arg(long)]
        json: bool,
    },
    /// Resolve a request path to a route and its parameters
    Match { path: String },
    /// Build the URL of a named route from key=value parameters
    Url { name: String, params: Vec<String> },
}

#[derive(Serialize)]
struct RouteSummary<'a> {
    name: &'a str,
    pattern: &'a str,
    handler: String,
    required: &'a [String],
    optional: &'a [String],
}

impl<'a> From<&'a Route> for RouteSummary<'a> {
    fn from(route: &'a Route) -> Self {
        Self {
            name: route.name(),
            pattern: route.uri(),
            handler: route.handler().to_string(),
            required: route.required_params(),
            optional: route.optional_params(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&ObservabilityConfig {
        log_level: cli.log_level.clone(),
        ..ObservabilityConfig::default()
    })?;

    let config = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let router = Router::from_config(&config).context("building router")?;
    tracing::debug!(routes = router.len(), path = %cli.config.display(), "Route table loaded");

    match cli.command {
        Commands::Check => {
            println!("{}: {} routes OK", cli.config.display(), router.len());
        }
        Commands::Routes { json } => {
            let summaries: Vec<RouteSummary<'_>> = router.routes().map(RouteSummary::from).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for s in &summaries {
                    println!("{:<20} {:<40} {}", s.name, s.pattern, s.handler);
                }
            }
        }
        Commands::Match { path } => {
            let request = RequestPath::parse(&path)?;
            let matched = router.resolve(request.path())?;
            let params: BTreeMap<_, _> = matched.params.iter().collect();
            println!("route:   {}", matched.route.name());
            println!("handler: {}", matched.route.handler());
            for (name, value) in params {
                println!("  {name} = {value}");
            }
        }
        Commands::Url { name, params } => {
            let params = parse_params(&params)?;
            println!("{}", router.url(&name, &params)?);
        }
    }

    Ok(())
}

fn parse_params(raw: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for pair in raw {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected key=value, got `{pair}`");
        };
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}
