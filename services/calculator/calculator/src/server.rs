use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinError, JoinHandle};

use calculator_client::Reply;

use crate::api::Handler;
use crate::config::Config;
use crate::error::CalculatorError;
use crate::shutdown;

/// A bound evaluator that has not started accepting yet
pub struct Server {
    listener: TcpListener,
    handler: Arc<Handler>,
    concurrent: bool,
}

/// A running accept loop
pub struct ServerHandle {
    addr: SocketAddr,
    worker_handle: JoinHandle<()>,
    worker_shutdown: shutdown::Sender,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting and waits for the accept loop to exit
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.worker_shutdown.shutdown();
        self.worker_handle.await
    }
}

impl Server {
    /// Binds the listening socket, failing fast if the address is unavailable
    pub async fn bind(config: &Config) -> Result<Server, CalculatorError> {
        let addr = config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| CalculatorError::Bind(addr.clone(), e.to_string()))?;

        Ok(Server {
            listener,
            handler: Arc::new(Handler::new(config)),
            concurrent: config.concurrent,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Binds and spawns the accept loop
    pub async fn start(config: &Config) -> Result<ServerHandle, CalculatorError> {
        let server = Server::bind(config).await?;
        let addr = server
            .local_addr()
            .map_err(|e| CalculatorError::Bind(config.addr(), e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = shutdown::channel();
        let worker_handle = tokio::spawn(server.run(shutdown_rx));

        info!("Evaluator listening on {}", addr);

        Ok(ServerHandle {
            addr,
            worker_handle,
            worker_shutdown: shutdown_tx,
        })
    }

    async fn run(self, mut shutdown: shutdown::Receiver) {
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Accept loop shutting down");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) if self.concurrent => {
                            let handler = self.handler.clone();
                            tokio::spawn(async move { handle(&handler, stream, peer).await });
                        }
                        Ok((stream, peer)) => handle(&self.handler, stream, peer).await,
                        Err(e) => error!("Accept failed: {}", e),
                    }
                }
            }
        }
    }
}

async fn handle(handler: &Handler, mut stream: TcpStream, peer: SocketAddr) {
    debug!("Connection from {}", peer);
    match handler.serve(&mut stream).await {
        Ok(Reply::Value(val)) => debug!("Replied {} to {}", val, peer),
        Ok(Reply::Failure(message)) => debug!("Replied failure \"{}\" to {}", message, peer),
        Err(e) => warn!("Connection from {} failed: {}", peer, e),
    }
}
