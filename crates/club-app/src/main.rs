mod config;
mod error;
mod web;

use crate::config::AppConfig;
use club_bus::{BusConfig, EventBus};
use club_metrics::Metrics;
use club_notify::{NotifyConfig, Notifier};
use club_provider::{ProviderClient, ProviderConfig};
use club_store::{ConnectionPool, SystemClock};
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Everything a route needs beyond its own request guards, constructed once
/// at launch (spec.md §5 "global mutable state": a process-wide metrics
/// struct and the database handle, everything else passed explicitly).
pub struct AppState {
    pub pool: ConnectionPool,
    pub provider: Arc<ProviderClient>,
    pub bus: Arc<EventBus>,
    pub notifier: Arc<Notifier>,
    pub metrics: Arc<Metrics>,
    pub clock: Arc<SystemClock>,
    pub signing_secret: String,
}

async fn run_migrations(rocket: Rocket<Build>) -> Rocket<Build> {
    tokio::task::spawn_blocking(club_store::run_migrations)
        .await
        .expect("Error joining migrations task")
        .expect("Failed to apply migrations");

    rocket
}

#[rocket::launch]
fn rocket() -> _ {
    env_logger::init();

    let config = AppConfig::load().expect("Invalid application configuration");

    let pool = club_store::get_pool(config.db_pool_size).expect("Failed to build database pool");

    let provider = ProviderClient::new(ProviderConfig {
        base_url: config.provider.base_url.clone(),
        tenant_id: config.provider.tenant_id.clone(),
        timeout: Duration::from_secs(config.provider.timeout_secs),
    })
    .expect("Failed to build provider client");

    let bus = EventBus::new(BusConfig {
        base_url: config.bus.base_url.clone(),
        project_id: config.bus.project_id.clone(),
        timeout: Duration::from_secs(10),
    })
    .expect("Failed to build event bus client");

    let notifier = Notifier::new(NotifyConfig {
        base_url: config.notify.base_url.clone(),
        channel_id: config.notify.channel_id.clone(),
        bot_token: config.notify.bot_token.clone(),
        timezone: chrono_tz::Tz::from_str(&config.notify.timezone)
            .expect("Invalid notify.timezone"),
        dry_run: config.notify.dry_run,
    })
    .expect("Failed to build notifier client");

    let state = AppState {
        pool,
        provider: Arc::new(provider),
        bus: Arc::new(bus),
        notifier: Arc::new(notifier),
        metrics: Arc::new(Metrics::new()),
        clock: Arc::new(SystemClock),
        signing_secret: config.signing_secret,
    };

    rocket::build()
        .manage(state)
        .mount("/", web::routes())
        .attach(AdHoc::on_ignite("Migrations", run_migrations))
}
