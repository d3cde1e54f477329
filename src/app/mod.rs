use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    backend,
    config::{AnnouncerConfig, NetConfig, RegistrarConfig},
    handlers::{EventAnnouncer, SubscriptionRegistrar},
    web::routes,
    Result,
};

// ###################################
// ->  Structs
// ###################################
/// One component, wired to its backends and bound to its listener, ready to be served.
pub struct App {
    pub router: Router,
    pub listener: TcpListener,
}

impl App {
    pub fn new(router: Router, listener: TcpListener) -> Self {
        App { router, listener }
    }

    pub async fn build_announcer(config: AnnouncerConfig) -> Result<Self> {
        let store = backend::object_store_from_config(&config.store_config)?;
        let notifier = backend::notifier_from_config(&config.notifier_config)?;
        info!(
            "{:<20} - bucket: {}, topic: {}",
            "Event announcer:", config.store_config.bucket, config.notifier_config.topic
        );

        let announcer = EventAnnouncer::new(store, notifier, config.expose_error_detail);
        let router = routes::announcer_routes(Arc::new(announcer));

        let listener = bind(&config.net_config).await?;
        Ok(App::new(router, listener))
    }

    pub async fn build_registrar(config: RegistrarConfig) -> Result<Self> {
        let notifier = backend::notifier_from_config(&config.notifier_config)?;
        info!(
            "{:<20} - topic: {}",
            "Subscription registrar:", config.notifier_config.topic
        );

        let registrar = SubscriptionRegistrar::new(notifier, config.expose_error_detail);
        let router = routes::registrar_routes(Arc::new(registrar));

        let listener = bind(&config.net_config).await?;
        Ok(App::new(router, listener))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

async fn bind(net_config: &NetConfig) -> Result<TcpListener> {
    let addr = SocketAddr::from((net_config.host, net_config.app_port));
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    info!("{:<20} - {}", "Listening on:", addr);
    Ok(listener)
}
