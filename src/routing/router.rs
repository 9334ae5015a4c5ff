//! Route table and lookup.
//!
//! # Responsibilities
//! - Build the fixed route table for each service
//! - Look up the route for a (method, path) pair
//! - Return an explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan, first match wins (tables hold a handful of routes)
//! - Tables are built so no two routes overlap

use std::path::PathBuf;

use axum::http::Method;

use crate::config::{ServerConfig, ServiceKind};
use crate::routing::matcher::{AnyOfMatcher, ExactPathMatcher, Matcher, SuffixPathMatcher};

pub const STATUS_PATH: &str = "/api/v1/getAllStatus";
pub const HEALTH_PATH: &str = "/api/v1/healthcheck";
/// Misspelling of the health path that deployed clients still send.
pub const HEALTH_PATH_ALIAS: &str = "/api/v1/healtcheck";
pub const EVENT_SUFFIX: &str = "api/v1/cctv/events/active";

/// What a matched route does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Serve a file as `text/html`.
    StaticPage { file: PathBuf },
    /// Run a command and relay its JSON output.
    Command { command_line: String },
    /// Simulate an acknowledgment for a submitted event.
    EventAck,
}

/// A single entry of the route table.
#[derive(Debug)]
pub struct Route {
    /// Route identifier for logging.
    pub name: &'static str,
    pub method: Method,
    pub matcher: Box<dyn Matcher>,
    pub handler: Handler,
}

impl Route {
    pub fn new(name: &'static str, method: Method, matcher: impl Matcher + 'static, handler: Handler) -> Self {
        Self {
            name,
            method,
            matcher: Box::new(matcher),
            handler,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.matcher.matches(path)
    }
}

/// Immutable routing table.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The fixed route table of a service.
    pub fn for_service(service: ServiceKind, config: &ServerConfig) -> Self {
        let page = Handler::StaticPage {
            file: config.page.file.clone(),
        };

        let routes = match service {
            ServiceKind::Relay => vec![
                Route::new("page", Method::GET, SuffixPathMatcher::new(".html"), page),
                Route::new(
                    "status",
                    Method::GET,
                    ExactPathMatcher::new(STATUS_PATH),
                    Handler::Command {
                        command_line: config.relay.status_command.clone(),
                    },
                ),
                Route::new(
                    "health",
                    Method::GET,
                    AnyOfMatcher::exact_paths([HEALTH_PATH, HEALTH_PATH_ALIAS]),
                    Handler::Command {
                        command_line: config.relay.health_command.clone(),
                    },
                ),
            ],
            ServiceKind::Receiver => vec![
                Route::new("page", Method::GET, SuffixPathMatcher::new("sample.html"), page),
                Route::new(
                    "event",
                    Method::POST,
                    SuffixPathMatcher::new(EVENT_SUFFIX),
                    Handler::EventAck,
                ),
            ],
        };

        Self::new(routes)
    }

    /// Find the route for a request, if any.
    pub fn match_request(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(method, path))
    }
}
