use log::{debug, error};
use tokio::net::UdpSocket;

use crate::frame;

/// Receives request datagrams forever, answering each independently
///
/// Receive and send failures are logged and skipped, a bad datagram or an
/// unreachable client must never take the server down
pub async fn serve(mut socket: UdpSocket) {
    let mut buffer = [0u8; 1024];
    loop {
        let (received, remote) = match socket.recv_from(&mut buffer).await {
            Ok(r) => r,
            Err(e) => {
                error!("receive error: {}", e);
                continue;
            }
        };
        debug!("{} byte datagram from {}", received, remote);

        let response = frame::handle(&buffer[..received]);
        if let Err(e) = socket.send_to(&response, &remote).await {
            error!("failed to respond to {}: {}", remote, e);
        }
    }
}
