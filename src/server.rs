use crate::config::Config;
use crate::error::ApiError;
use crate::http_request;
use crate::http_response;
use crate::registry::StatusCodeRegistry;
use crate::router::{error_response, Router};
use crate::synthesizer::ResponseSynthesizer;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::io::BufReader;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

pub struct Server {
    listener: TcpListener,
    router: Router,
    compression: bool,
}

impl Server {
    /// Builds the registry and binds the listener. Nothing is served until [`Server::run`].
    pub fn bind(config: &Config) -> Result<Server> {
        let registry = StatusCodeRegistry::builtin().context("Invalid status code table")?;
        info!("Loaded {} status code descriptors", registry.len());
        let router = Router::new(ResponseSynthesizer::new(Arc::new(registry)));

        let listener = TcpListener::bind(config.addr())
            .with_context(|| format!("Failed to bind {}", config.addr()))?;

        Ok(Server {
            listener,
            router,
            compression: !config.disable_compression,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    pub fn run(self) -> Result<()> {
        info!("Listening on {}", self.local_addr()?);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = self.router.clone();
                    let compression = self.compression;
                    thread::spawn(move || {
                        let peer = stream.peer_addr().ok();
                        debug!("Accepted connection from {:?}", peer);
                        if let Err(e) = handle_connection(stream, &router, compression) {
                            error!("Connection from {:?} failed: {:#}", peer, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                }
            }
        }

        Ok(())
    }
}

fn handle_connection(mut stream: TcpStream, router: &Router, compression: bool) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone().context("Failed to clone stream")?);
    let request = match http_request::parse(&mut reader, &mut stream) {
        Ok(request) => request,
        Err(e) => {
            let rejection = error_response(&ApiError::BadRequest(format!("{:#}", e)), "");
            if let Err(send_error) = http_response::send(&mut stream, rejection) {
                debug!("Failed to answer unparseable request: {:#}", send_error);
            }
            return Err(e);
        }
    };

    let mut response = router.handle(&request);
    if compression && request.accepts_gzip() {
        response = response.gzip()?;
    }
    info!(
        "{} {} -> {} {}",
        request.method, request.path, response.status.code, response.status.text
    );

    http_response::send(&mut stream, response)
}
