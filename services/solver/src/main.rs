use log::info;
use tokio::net::{TcpListener, UdpSocket};

use crate::config::{Config, Mode};
use crate::error::ServerError;

mod config;
mod error;
mod frame;
mod session;
mod tcp;
mod udp;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    env_logger::init();

    let config = Config::from_env()?;
    let addr = config.addr()?;

    match config.mode()? {
        Mode::Tcp => {
            let listener = TcpListener::bind(&addr).await?;
            info!("listening on tcp {}", listener.local_addr()?);
            tcp::serve(listener).await?;
        }
        Mode::Udp => {
            let socket = UdpSocket::bind(&addr).await?;
            info!("listening on udp {}", socket.local_addr()?);
            udp::serve(socket).await;
        }
    }

    Ok(())
}
