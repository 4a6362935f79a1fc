//! `groundwork serve` — Start the HTTP gateway.

use std::path::PathBuf;

pub async fn run(
    config_path: Option<PathBuf>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path.as_deref())?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("groundwork gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Storage:   {}", config.storage.backend);
    println!("   Model:     {}", config.completion.model);

    groundwork_gateway::start(config).await?;

    Ok(())
}
