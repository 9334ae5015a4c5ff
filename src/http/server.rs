//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the dispatch fallback
//! - Wire up middleware (tracing, request ID, one exchange per connection)
//! - Serve plain HTTP on a bound listener or HTTPS through rustls
//! - Stop accepting on the shutdown signal, letting in-flight requests finish

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::ack::AckSimulator;
use crate::config::{ServerConfig, ServiceKind};
use crate::executor::{CommandRunner, ShellExecutor};
use crate::http::handlers::dispatch;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::routing::RouteTable;

/// Application state injected into the dispatcher. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub routes: Arc<RouteTable>,
    pub executor: Arc<dyn CommandRunner>,
    pub simulator: AckSimulator,
}

/// HTTP server for one member of the service family.
pub struct HttpServer {
    router: Router,
    service: ServiceKind,
}

impl HttpServer {
    /// Create a server with the shell executor and a randomized simulator.
    pub fn new(service: ServiceKind, config: ServerConfig) -> Self {
        let executor = ShellExecutor::new()
            .with_timeout(config.relay.command_timeout_secs.map(Duration::from_secs));
        let simulator = AckSimulator::from_config(&config.ack);
        Self::with_components(service, config, Arc::new(executor), simulator)
    }

    /// Create a server around caller-supplied executor and simulator.
    pub fn with_components(
        service: ServiceKind,
        config: ServerConfig,
        executor: Arc<dyn CommandRunner>,
        simulator: AckSimulator,
    ) -> Self {
        let routes = Arc::new(RouteTable::for_service(service, &config));

        let state = AppState {
            config: Arc::new(config),
            routes,
            executor,
            simulator,
        };

        Self {
            router: Self::build_router(state),
            service,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(SetResponseHeaderLayer::overriding(
                header::CONNECTION,
                HeaderValue::from_static("close"),
            ))
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve plain HTTP until the shutdown signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(service = self.service.name(), address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(service = self.service.name(), "HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until the shutdown signal.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(service = self.service.name(), address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let stopper = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            // Closes the listener; open connections are left to finish.
            stopper.graceful_shutdown(None);
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!(service = self.service.name(), "HTTPS server stopped");
        Ok(())
    }
}
