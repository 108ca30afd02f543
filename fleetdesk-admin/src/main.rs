use std::sync::Arc;

use env_logger::{Builder, Target};
use fleetdesk_admin::domains::settings::messages::Message;
use fleetdesk_admin::domains::settings::state::{Session, SettingsTab};
use fleetdesk_admin::infra::api_client::ApiClient;
use fleetdesk_admin::infra::config::Config;
use fleetdesk_admin::infra::services::{FleetApiAdapter, FleetDataService};
use fleetdesk_admin::infra::testing::stubs::TestFleetService;
use fleetdesk_admin::{Runtime, SettingsDomain};
use log::LevelFilter;

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("fleetdesk_admin", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let config = Config::load()?;
    log::info!("Loaded {:?}", config);

    let service: Arc<dyn FleetDataService> = if config.demo {
        log::warn!("Demo mode: using the in-memory fleet service");
        Arc::new(TestFleetService::with_sample_fleet())
    } else {
        let client =
            ApiClient::new(&config.service_url, config.api_key.clone())?
                .with_access_token(config.access_token.clone());
        Arc::new(FleetApiAdapter::new(Arc::new(client)))
    };

    let domain = SettingsDomain::new(
        Session { role: config.role },
        service,
        config.redirect_target(),
    );
    let mut runtime = Runtime::new(domain);

    runtime.settle(Message::Mount).await;
    println!("{}", runtime.view());

    if runtime.state().session.is_admin() {
        runtime.settle(Message::SelectTab(SettingsTab::Vehicles)).await;
        println!("{}", runtime.view());
    }

    for event in runtime.take_events() {
        log::info!("Event: {:?}", event);
    }

    Ok(())
}
