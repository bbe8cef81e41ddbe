//! Route matching and URL building through the public API.

use routekit::config::parse_config;
use routekit::routing::{Params, Route, RouteHandler, Router, RoutingError};

fn handler() -> RouteHandler {
    RouteHandler::new("thecontroller/theaction").unwrap()
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn index_router() -> Router {
    let route = Route::builder("index", "/some/path/:param1/:param2", handler())
        .default("param1", "foo")
        .requirement("param2", r"^\d+$")
        .build()
        .unwrap();
    Router::builder().route(route).unwrap().build()
}

#[test]
fn test_uri_fills_defaults() {
    let router = index_router();
    assert_eq!(
        router.uri(Some("index"), &params(&[("param2", "12345")]), "/").unwrap(),
        "/some/path/foo/12345"
    );
}

#[test]
fn test_uri_requirement_not_met() {
    let router = index_router();
    assert_eq!(
        router
            .uri(Some("index"), &params(&[("param2", "abc")]), "/")
            .unwrap_err(),
        RoutingError::ParamRequirementNotMet("param2".into())
    );
}

#[test]
fn test_absent_default_shortens_uri() {
    let route = Route::builder("r", "/some/path/:param1", handler())
        .optional("param1")
        .build()
        .unwrap();
    assert_eq!(route.parsed_uri(&Params::new()).unwrap(), "/some/path");
}

#[test]
fn test_absent_optional_before_present_segment() {
    let route = Route::builder("r", "/some/path/:param1/:param2", handler())
        .optional("param1")
        .build()
        .unwrap();
    assert_eq!(
        route.parsed_uri(&params(&[("param2", "foo")])).unwrap_err(),
        RoutingError::MissingOptionalParameter("param1".into())
    );
}

#[test]
fn test_root_route() {
    let route = Route::builder("root", "/", handler()).build().unwrap();
    assert!(route.matches_url(""));
    assert!(route.matches_url("/"));
    assert_eq!(route.parsed_uri(&Params::new()).unwrap(), "/");
}

#[test]
fn test_empty_router_then_add_route() {
    let empty = Router::builder().build();
    assert_eq!(
        empty.route_by_url("/foo").unwrap_err(),
        RoutingError::NoRouteMatches("/foo".into())
    );

    let mut builder = Router::builder();
    builder
        .add_route(Route::builder("foo", "/foo", handler()).build().unwrap())
        .unwrap();
    assert_eq!(builder.build().route_by_url("/foo").unwrap().name(), "foo");
}

#[test]
fn test_missing_required_parameter_never_substituted() {
    let router = index_router();
    assert_eq!(
        router.url("index", &Params::new()).unwrap_err(),
        RoutingError::MissingRequiredParameter("param2".into())
    );
}

#[test]
fn test_requirement_checked_even_with_default() {
    let route = Route::builder("r", "/p/:id", handler())
        .default("id", "1")
        .requirement("id", r"^\d+$")
        .build()
        .unwrap();
    assert_eq!(
        route.parsed_uri(&params(&[("id", "x")])).unwrap_err(),
        RoutingError::ParamRequirementNotMet("id".into())
    );
    assert_eq!(route.parsed_uri(&Params::new()).unwrap(), "/p/1");
}

#[test]
fn test_built_urls_match_back() {
    let table = parse_config(
        r#"
        [[routes]]
        name = "article"
        pattern = "/articles/:id/:page/:slug"
        handler = "articles/show"
        defaults = { page = 1, slug = false }
        requirements = { id = '^\d+$' }

        [[routes]]
        name = "user"
        pattern = "/users/:name/edit"
        handler = "users/edit"
        "#,
    )
    .unwrap();
    let router = Router::from_config(&table).unwrap();

    for (name, values) in [
        ("article", params(&[("id", "7")])),
        ("article", params(&[("id", "7"), ("page", "3")])),
        ("article", params(&[("id", "7"), ("page", "3"), ("slug", "hello")])),
        ("user", params(&[("name", "ana")])),
    ] {
        let url = router.url(name, &values).unwrap();
        let route = router.route(name).unwrap();
        assert!(route.matches_url(&url), "{url} should match {name}");

        let resolved = router.resolve(&url).unwrap();
        assert_eq!(resolved.route.name(), name);
        for (k, v) in &values {
            assert_eq!(resolved.param(k), Some(v.as_str()));
        }
    }
}

#[test]
fn test_longer_url_never_matches() {
    let router = index_router();
    assert!(router.route_by_url("/some/path/foo/1/extra").is_err());
}

#[test]
fn test_first_registered_route_wins() {
    let router = Router::builder()
        .route(Route::builder("a", "/x/:anything", handler()).build().unwrap())
        .unwrap()
        .route(Route::builder("b", "/x/y", handler()).build().unwrap())
        .unwrap()
        .build();
    assert_eq!(router.route_by_url("/x/y").unwrap().name(), "a");
}

#[test]
fn test_omitted_required_trailing_variable_does_not_match() {
    let router = Router::builder()
        .route(Route::builder("bar", "/foo/:bar", handler()).build().unwrap())
        .unwrap()
        .build();
    assert_eq!(
        router.route_by_url("/foo").unwrap_err(),
        RoutingError::NoRouteMatches("/foo".into())
    );
}
