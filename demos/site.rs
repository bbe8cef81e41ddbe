//! Demo site served through the router and dispatcher.
//!
//! ```text
//! cargo run --example site [-- path/to/routes.toml]
//! ```
//!
//! Changes to the route table are picked up while the site runs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use routekit::config::load_config;
use routekit::config::watcher::RouteTableWatcher;
use routekit::dispatch::{ActionContext, ActionRegistry, ActionResponse, ActionResult, Dispatcher};
use routekit::http::{shutdown_signal, spawn_reloader, HttpServer};
use routekit::observability::{init_logging, init_metrics};
use routekit::routing::{Params, Router};

fn layout(ctx: &ActionContext<'_>, title: &str, body: &str) -> ActionResult {
    let home = ctx.uri(Some("index"), &Params::new())?;
    let articles = ctx.uri(Some("articles"), &Params::new())?;
    let about = ctx.uri(Some("about"), &Params::new())?;
    Ok(ActionResponse::html(format!(
        "<html><head><title>{title}</title></head><body>\
         <nav><a href=\"{home}\">Home</a> <a href=\"{articles}\">Articles</a> \
         <a href=\"{about}\">About</a></nav>{body}</body></html>"
    )))
}

fn index(ctx: &ActionContext<'_>) -> ActionResult {
    layout(ctx, "Home", "<h1>Welcome</h1>")
}

const ARTICLES_PER_PAGE: u32 = 3;
const LAST_PAGE: u32 = 1000;

/// Page number from the path, kept within `1..=LAST_PAGE`. Numbers too
/// large for `u32` land on the last page.
fn clamp_page(raw: Option<&str>) -> u32 {
    let page = match raw {
        Some(raw) => raw.parse::<u32>().unwrap_or(LAST_PAGE),
        None => 1,
    };
    page.clamp(1, LAST_PAGE)
}

fn list_articles(ctx: &ActionContext<'_>) -> ActionResult {
    let page = clamp_page(ctx.param("page"));
    let mut items = String::new();
    for id in (page - 1) * ARTICLES_PER_PAGE + 1..=page * ARTICLES_PER_PAGE {
        let params: Params = [
            ("id".to_string(), id.to_string()),
            ("slug".to_string(), format!("article-{id}")),
        ]
        .into();
        let href = ctx.uri(Some("article"), &params)?;
        items.push_str(&format!("<li><a href=\"{href}\">Article {id}</a></li>"));
    }
    let next: Params = [("page".to_string(), (page + 1).min(LAST_PAGE).to_string())].into();
    let next = ctx.uri(Some("articles"), &next)?;
    layout(
        ctx,
        "Articles",
        &format!("<h1>Page {page}</h1><ul>{items}</ul><a href=\"{next}\">Next</a>"),
    )
}

fn show_article(ctx: &ActionContext<'_>) -> ActionResult {
    let id = ctx.param("id").unwrap_or_default();
    let Some(slug) = ctx.param("slug") else {
        // canonical links carry the slug
        let params: Params = [
            ("id".to_string(), id.to_string()),
            ("slug".to_string(), format!("article-{id}")),
        ]
        .into();
        return Ok(ActionResponse::redirect(ctx.uri(Some("article"), &params)?));
    };
    let here = ctx.uri(None, &Params::new())?;
    layout(
        ctx,
        slug,
        &format!("<h1>Article {id}</h1><p>You are reading {here}</p>"),
    )
}

fn about(ctx: &ActionContext<'_>) -> ActionResult {
    let controllers = ctx
        .controller_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    layout(
        ctx,
        "About",
        &format!("<h1>About</h1><p>Controllers live in {controllers}</p>"),
    )
}

fn actions() -> Result<ActionRegistry> {
    let mut actions = ActionRegistry::new();
    actions
        .register("index/index", index)?
        .register("articles/list", list_articles)?
        .register("articles/show", show_article)?
        .register("pages/about", about)?;
    Ok(actions)
}

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("demos/routes.toml"), PathBuf::from);
    let config = load_config(&path).with_context(|| format!("loading {}", path.display()))?;

    init_logging(&config.observability)?;
    tracing::info!(path = %path.display(), routes = config.routes.len(), "Configuration loaded");

    if config.observability.metrics_enabled {
        init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let router = Router::from_config(&config)?;
    let dispatcher = Dispatcher::new(router.into(), actions()?);
    for route in dispatcher.unregistered_routes() {
        tracing::warn!(route = %route.name(), handler = %route.handler(), "Route has no registered action");
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = HttpServer::new(config.server.clone(), dispatcher);

    let (watcher, updates) = RouteTableWatcher::new(&path);
    let _watcher = watcher.run()?;
    spawn_reloader(server.dispatcher_handle(), updates);

    server.run(listener, shutdown_signal()).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
