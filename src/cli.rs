use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coin-tracker")]
#[command(about = "Terminal dashboard for top cryptocurrency prices")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the coin list and open the interactive dashboard
    Dashboard {
        /// Proxy endpoint the dashboard fetches from
        #[arg(short, long)]
        proxy_url: Option<String>,
    },

    /// Run the API proxy that holds the CoinMarketCap credential
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3000
        #[arg(short, long)]
        bind: Option<String>,
    },
}
