//! Background mock server for end-to-end tests.

use std::net::SocketAddr;
use std::thread::JoinHandle;

use tokio::sync::oneshot;

/// A mock todo server listening on an ephemeral loopback port.
///
/// The server runs on its own thread with a current-thread tokio runtime.
/// Dropping the handle shuts it down gracefully and joins the thread. Every
/// `TestServer` has its own store.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the socket cannot be bound.
    pub fn start() -> std::io::Result<Self> {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = std_listener.local_addr()?;
        std_listener.set_nonblocking(true)?;

        let (shutdown, stop) = oneshot::channel::<()>();
        let thread = std::thread::spawn(move || {
            let result = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .and_then(|rt| {
                    rt.block_on(async move {
                        let listener = tokio::net::TcpListener::from_std(std_listener)?;
                        mock_server::run_until(listener, async move {
                            // A dropped sender also means stop.
                            let _ = stop.await;
                        })
                        .await
                    })
                });
            match result {
                Ok(()) => tracing::debug!(%addr, "mock server stopped"),
                Err(e) => tracing::error!(%addr, error = %e, "mock server failed"),
            }
        });

        tracing::debug!(%addr, "mock server started");
        Ok(Self {
            addr,
            shutdown: Some(shutdown),
            thread: Some(thread),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL to hand to a client, e.g. `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr())
    }

    /// Session token of the primary seeded user.
    pub fn session(&self) -> &'static str {
        mock_server::TEST_SESSION
    }

    /// Session token of the secondary seeded user.
    pub fn other_session(&self) -> &'static str {
        mock_server::OTHER_SESSION
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!(addr = %self.addr, "mock server thread panicked");
            }
        }
    }
}
