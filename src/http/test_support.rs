use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::error::AppResult;

/// Chooses a raw HTTP response from the raw request text.
pub(crate) type Route = fn(&str) -> &'static str;

/// Serves one response per connection and closes it.
pub(crate) async fn spawn_http_server(route: Route) -> AppResult<(String, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buffer = vec![0_u8; 4096];
                let Ok(read) = socket.read(&mut buffer).await else {
                    return;
                };
                let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());
                let response = route(&request);
                if socket.write_all(response.as_bytes()).await.is_err() {
                    return;
                }
                drop(socket.shutdown().await);
            });
        }
    });
    Ok((format!("http://{addr}"), handle))
}

pub(crate) const fn ok_response(_request: &str) -> &'static str {
    "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello"
}

pub(crate) fn redirect_response(request: &str) -> &'static str {
    if request.starts_with("GET /final") {
        ok_response(request)
    } else {
        "HTTP/1.1 302 Found\r\nLocation: /final\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    }
}

/// Sum of `content-length: 5` and `connection: close` plus the block
/// terminator, as estimated for [`ok_response`].
pub(crate) const OK_RESPONSE_BYTES: u64 = 5 + 19 + 19 + 2;
