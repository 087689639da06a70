use headlines_api::{config, global::Global, http};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy(&config.level),
        )
        .init();

    tracing::info!("starting headlines api");

    let global = Global::init(config)?;

    if let Err(e) = http::run(global).await {
        tracing::error!("http server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
