//! Shared fixtures for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use routekit::config::{parse_config, RoutekitConfig};
use routekit::dispatch::{ActionContext, ActionRegistry, ActionResponse, Dispatcher};
use routekit::routing::{Params, Router};

pub const ROUTES: &str = r#"
[server]
request_timeout_secs = 5

[[routes]]
name = "index"
pattern = "/"
handler = "index/index"

[[routes]]
name = "article"
pattern = "/articles/:id/:slug"
handler = "articles/show"
defaults = { slug = false }
requirements = { id = '^\d+$' }

[[routes]]
name = "orphan"
pattern = "/orphan"
handler = "orphan/index"
"#;

pub fn config() -> RoutekitConfig {
    parse_config(ROUTES).unwrap()
}

pub fn router() -> Router {
    Router::from_config(&config()).unwrap()
}

pub fn actions() -> ActionRegistry {
    let mut actions = ActionRegistry::new();
    actions
        .register("index/index", |_ctx: &ActionContext<'_>| {
            Ok(ActionResponse::text("home"))
        })
        .unwrap()
        .register("articles/show", |ctx: &ActionContext<'_>| {
            match ctx.param("slug") {
                Some(slug) => Ok(ActionResponse::text(format!(
                    "article {} ({slug})",
                    ctx.param("id").unwrap_or_default()
                ))),
                None => {
                    let params: Params = [
                        ("id".to_string(), ctx.param("id").unwrap_or_default().to_string()),
                        ("slug".to_string(), "untitled".to_string()),
                    ]
                    .into();
                    Ok(ActionResponse::redirect(ctx.uri(Some("article"), &params)?))
                }
            }
        })
        .unwrap();
    actions
}

pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(router()), actions())
}

/// Send a bare HTTP/1.1 GET and return the status code and body.
#[allow(dead_code)]
pub async fn raw_get(addr: SocketAddr, path: &str) -> (u16, String) {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = String::new();
    socket.read_to_string(&mut raw).await.unwrap();

    let status = raw
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    let body = raw
        .split_once("\r\n\r\n")
        .map(|(_, body)| body.to_string())
        .unwrap_or_default();
    (status, body)
}
