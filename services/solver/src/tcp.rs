use log::{error, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::session::Session;

/// Accepts connections forever, one task per connection
///
/// Sessions share no state, a failure on one connection never affects
/// another in flight
pub async fn serve(mut listener: TcpListener) -> std::io::Result<()> {
    loop {
        let (socket, remote) = listener.accept().await?;
        info!("accepted connection from {}", remote);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket).await {
                error!("connection error from {}: {}", remote, e);
            }
        });
    }
}

/// Drives a session until it terminates, the client disconnects, or I/O fails
///
/// Dropping the socket on return closes the connection exactly once, so the
/// client observes end-of-stream immediately after the final reply
async fn handle_connection(socket: TcpStream) -> std::io::Result<()> {
    let (read, mut write) = socket.into_split();
    let mut lines = BufReader::new(read).lines();

    let mut session = Session::new();
    while let Some(line) = lines.next_line().await? {
        let reply = match session.handle_line(&line) {
            Some(reply) => reply,
            None => break,
        };

        write.write_all(format!("{}\n", reply).as_bytes()).await?;
        if reply.terminates() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::net::SocketAddr;

    use tokio::io::AsyncReadExt;

    use super::*;

    async fn start_server() -> Result<SocketAddr, Box<dyn Error>> {
        let bind: SocketAddr = "127.0.0.1:0".parse()?;
        let listener = TcpListener::bind(&bind).await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = serve(listener).await;
        });
        Ok(addr)
    }

    async fn exchange(addr: SocketAddr, request: &[u8]) -> Result<Vec<u8>, Box<dyn Error>> {
        let mut socket = TcpStream::connect(&addr).await?;
        socket.write_all(request).await?;

        let mut response = Vec::new();
        socket.read_to_end(&mut response).await?;
        Ok(response)
    }

    #[tokio::test]
    async fn test_solve_session() -> Result<(), Box<dyn Error>> {
        let addr = start_server().await?;
        assert_eq!(
            exchange(addr, b"HELLO\nSOLVE (+ 1 2)\nBYE\n").await?,
            b"HELLO\nRESULT 3\nBYE\n".to_vec()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_solve_disconnects() -> Result<(), Box<dyn Error>> {
        let addr = start_server().await?;
        assert_eq!(
            exchange(addr, b"HELLO\nSOLVE (/ 10 0)\n").await?,
            b"HELLO\nBYE\n".to_vec()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_bye_without_hello() -> Result<(), Box<dyn Error>> {
        let addr = start_server().await?;
        assert_eq!(exchange(addr, b"BYE\n").await?, b"BYE\n".to_vec());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_greeting() -> Result<(), Box<dyn Error>> {
        let addr = start_server().await?;
        assert_eq!(exchange(addr, b"ABC\n").await?, b"BYE\n".to_vec());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_hello() -> Result<(), Box<dyn Error>> {
        let addr = start_server().await?;
        assert_eq!(
            exchange(addr, b"HELLO\nHELLO\n").await?,
            b"HELLO\nBYE\n".to_vec()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_long_solve() -> Result<(), Box<dyn Error>> {
        let addr = start_server().await?;

        let mut request = b"HELLO\nSOLVE (+".to_vec();
        request.extend_from_slice(" 1".repeat(1000).as_bytes());
        request.extend_from_slice(b")\nBYE\n");

        assert_eq!(
            exchange(addr, &request).await?,
            b"HELLO\nRESULT 1000\nBYE\n".to_vec()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sessions_are_independent() -> Result<(), Box<dyn Error>> {
        let addr = start_server().await?;

        let mut first = TcpStream::connect(&addr).await?;
        first.write_all(b"HELLO\n").await?;

        let mut greeting = [0u8; 6];
        first.read_exact(&mut greeting).await?;
        assert_eq!(&greeting, b"HELLO\n");

        // A second connection failing has no effect on the first
        assert_eq!(exchange(addr, b"ABC\n").await?, b"BYE\n".to_vec());

        first.write_all(b"SOLVE (* 2 3)\nBYE\n").await?;
        let mut rest = Vec::new();
        first.read_to_end(&mut rest).await?;
        assert_eq!(rest, b"RESULT 6\nBYE\n".to_vec());
        Ok(())
    }
}
