use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Serves HTTP status code references, answering each with the status it describes.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// Port to listen on, 0 picks a free one
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Never gzip response bodies
    #[arg(long)]
    pub disable_compression: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            log_level: "info".to_string(),
            disable_compression: false,
        }
    }
}
