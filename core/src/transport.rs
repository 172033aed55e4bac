//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the I/O seam of the crate. `TodoClient` only builds request
//! values; whatever implements this trait performs the round-trip. The default
//! `UreqTransport` is blocking and returns 4xx/5xx responses as data, with
//! the body kept as raw bytes.

use ureq::{Agent, RequestBuilder};

use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP exchange.
pub trait Transport {
    /// Send `request` and return the server's response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` when no response could be obtained.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let mut response = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url), headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(url), headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Raw bytes with no size cap: an odd or large body is still a response.
        let body = response.body_mut().with_config().limit(u64::MAX).read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread::JoinHandle;

    use super::*;

    /// Serve one connection: read the request head, write `response` verbatim.
    fn serve_once(response: &'static [u8]) -> (SocketAddr, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response).unwrap();
        });
        (addr, handle)
    }

    fn get(addr: SocketAddr) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/api/v1/items"),
            headers: vec![("cookie".to_string(), "todo-session=tok".to_string())],
            body: None,
        }
    }

    #[test]
    fn non_utf8_error_body_is_still_a_response() {
        let (addr, server) = serve_once(
            b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 2\r\nconnection: close\r\n\r\n\xff\xfe",
        );

        let response = UreqTransport::new().send(&get(addr)).unwrap();
        server.join().unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, vec![0xff, 0xfe]);
        assert_eq!(response.header("content-length"), Some("2"));
    }

    #[test]
    fn body_is_not_capped_at_ten_megabytes() {
        const LEN: usize = 11 * 1024 * 1024;
        let mut raw = format!(
            "HTTP/1.1 200 OK\r\ncontent-length: {LEN}\r\nconnection: close\r\n\r\n"
        )
        .into_bytes();
        raw.resize(raw.len() + LEN, b'a');
        let (addr, server) = serve_once(raw.leak());

        let response = UreqTransport::new().send(&get(addr)).unwrap();
        server.join().unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body.len(), LEN);
    }
}
