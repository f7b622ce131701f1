use cxo_dashboard::app;
use cxo_dashboard::config::Config;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // CXO_DASHBOARD_* variables, then an optional address argument
    let args: Vec<String> = env::args().collect();
    let config = Config::from_env_and_args(&args);

    // Start the web application
    app::run(config).await?;

    Ok(())
}
