//! Service bootstrap: build the app, bind the listener, serve.

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::health;
use crate::logging::STARTUP_TARGET;
use crate::middleware::{CorsConfig, JsonBody, RequestIdMiddleware};
use crate::service::ServiceDescriptor;
use actix_web::{
    body::MessageBody,
    dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Condition,
    web, App, HttpServer,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Registers service-specific routes and app data.
pub type RouteConfigurer = Arc<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Build the application shared by every Hill90 service.
///
/// Installs the request-id, optional CORS and JSON body middleware, the
/// `/health` resource, then whatever `routes` adds. Unknown paths get
/// actix-web's default 404; other methods on `/health` get 405.
pub fn build_app(
    descriptor: ServiceDescriptor,
    json_body: JsonBody,
    cors: Option<&CorsConfig>,
    routes: RouteConfigurer,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors_enabled = cors.is_some();
    let cors = cors.map(CorsConfig::build).unwrap_or_default();

    App::new()
        .app_data(web::Data::new(descriptor))
        .wrap(json_body)
        .wrap(Condition::new(cors_enabled, cors))
        .wrap(RequestIdMiddleware)
        .service(web::resource("/health").route(web::get().to(health::health)))
        .configure(|cfg| routes(cfg))
}

/// A single service process: identity, configuration and routes.
///
/// Owned by `main`; nothing about it is global.
pub struct ServiceInstance {
    descriptor: ServiceDescriptor,
    config: ServiceConfig,
    routes: RouteConfigurer,
    cors: Option<CorsConfig>,
}

impl ServiceInstance {
    pub fn new(descriptor: ServiceDescriptor, config: ServiceConfig) -> Self {
        Self {
            descriptor,
            config,
            routes: Arc::new(|_| {}),
            cors: None,
        }
    }

    pub fn with_routes<F>(mut self, routes: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.routes = Arc::new(routes);
        self
    }

    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = Some(cors);
        self
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The app a worker would serve, for in-process testing.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        build_app(
            self.descriptor,
            JsonBody::new(self.config.json_body_limit),
            self.cors.as_ref(),
            Arc::clone(&self.routes),
        )
    }

    /// Open the listening socket.
    ///
    /// On success the startup line is logged with the port actually bound.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Configuration` for an invalid CORS policy and
    /// `ServiceError::Bind` if the address is in use or otherwise unbindable.
    /// There is no retry.
    pub fn bind(self) -> Result<BoundService> {
        let ServiceInstance {
            descriptor,
            config,
            routes,
            cors,
        } = self;

        if let Some(cors) = &cors {
            cors.validate()?;
        }

        let json_body = JsonBody::new(config.json_body_limit);
        let addr = config.bind_address();

        let server = HttpServer::new(move || {
            build_app(descriptor, json_body, cors.as_ref(), routes.clone())
        })
        .workers(config.workers)
        .shutdown_timeout(config.shutdown_timeout.as_secs())
        .bind((config.host.as_str(), config.port))
        .map_err(|source| ServiceError::Bind {
            addr: addr.clone(),
            source,
        })?;

        let local_addrs = server.addrs();
        let port = local_addrs
            .first()
            .map(SocketAddr::port)
            .unwrap_or(config.port);

        info!(
            target: STARTUP_TARGET,
            service = descriptor.name,
            host = %config.host,
            port,
            workers = config.workers,
            "{}",
            descriptor.startup_message(port)
        );

        Ok(BoundService {
            descriptor,
            local_addrs,
            server: server.run(),
        })
    }
}

/// A service whose listener is bound but not yet driven.
pub struct BoundService {
    descriptor: ServiceDescriptor,
    local_addrs: Vec<SocketAddr>,
    server: Server,
}

impl BoundService {
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    pub fn port(&self) -> Option<u16> {
        self.local_addrs.first().map(SocketAddr::port)
    }

    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    /// Hand the server future to the caller, e.g. to spawn it.
    pub fn into_server(self) -> Server {
        self.server
    }

    /// Serve until the server is stopped or receives a shutdown signal.
    pub async fn run(self) -> Result<()> {
        let name = self.descriptor.name;
        self.server.await?;
        info!(service = name, "Service stopped");
        Ok(())
    }
}
