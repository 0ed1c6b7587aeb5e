// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to load settings and call `run_server` from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config()?;
    let _guard = web_server::telemetry::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Configuration loaded.");
    web_server::run_server(&config).await
}
