mod cli;

use clap::Parser;

use cli::{Cli, Commands};
use coin_tracker::config::AppConfig;
use coin_tracker::error::Result;
use coin_tracker::{proxy, ui};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();

    match cli.command {
        Some(Commands::Serve { bind }) => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            config.require_api_key()?;
            proxy::run_server(config).await
        }
        Some(Commands::Dashboard { proxy_url }) => {
            if let Some(url) = proxy_url {
                config.proxy_url = url;
            }
            ui::run_dashboard(config).await
        }
        None => ui::run_dashboard(config).await,
    }
}
