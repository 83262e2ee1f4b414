use anyhow::Result;
use clap::Parser;
use http_status_reference::{Config, Server};

fn main() -> Result<()> {
    let config = Config::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    Server::bind(&config)?.run()
}
