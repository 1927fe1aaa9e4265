use std::env;

use chart_api::{
    init_tracing,
    paths::{ephemeris_data_path, install_root},
    run_server, AppState, EngineSlot,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let root = install_root();
    let mut settings = settings_loader::load_settings_or_default(&root)?;

    // Bind address may be overridden from the environment; the data path may not.
    if let Ok(host) = env::var("HOST") {
        settings.host = host;
    }
    if let Ok(port) = env::var("PORT") {
        settings.port = port.parse().unwrap_or(settings.port);
    }

    let ephe_path = ephemeris_data_path(&root);
    tracing::info!("Install root: {}", root.display());
    tracing::info!("Ephemeris data path: {}", ephe_path.display());

    // Pre-flight check; requests re-check and report the same problem as JSON.
    if let Err(err) = chart_engine::verify_data_directory(&ephe_path) {
        tracing::warn!("{}", err);
    }

    let engine = EngineSlot::from_connect(ephemeris::connect(&ephe_path));
    let state = AppState::new(engine, ephe_path, settings.clone());

    run_server(state, &settings.host, settings.port).await?;

    Ok(())
}
