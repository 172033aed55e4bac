//! Blocking client for the todo REST API.
//!
//! # Design
//! `TodoClient` holds a validated base URL and a `Transport`, nothing else.
//! The session is passed to every call instead of being stored. Each
//! operation has a `build_*` counterpart that produces the `HttpRequest`
//! without any I/O; the operation itself builds, sends once, and returns the
//! raw `HttpResponse` without looking at the status.

use url::Url;

use crate::error::{ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewTask, Session, TaskUpdate};

const ITEMS_PATH: [&str; 3] = ["api", "v1", "items"];
const USER_PATH: [&str; 3] = ["api", "v1", "user"];

/// Synchronous client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient<T = UreqTransport> {
    base_url: Url,
    transport: T,
}

impl TodoClient<UreqTransport> {
    /// Create a client that talks to `base_url` over a fresh `ureq` agent.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if `base_url` is not an http(s)
    /// URL that can carry a path.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> TodoClient<T> {
    /// Create a client that sends its requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if `base_url` is not an http(s)
    /// URL that can carry a path.
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(format!(
                "unsupported scheme `{}`",
                base_url.scheme()
            )));
        }
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(format!("{base_url} cannot carry a path")));
        }

        Ok(Self { base_url, transport })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // -- request builders --

    /// # Errors
    ///
    /// Returns `ClientError::Json` if the payload cannot be serialized.
    pub fn build_create_task(&self, session: &Session, text: &str, date: &str) -> Result<HttpRequest> {
        let body = serde_json::to_string(&NewTask {
            text: text.to_string(),
            date: date.to_string(),
        })?;
        Ok(self.request(HttpMethod::Post, self.url(&ITEMS_PATH), session, Some(body)))
    }

    pub fn build_read_all_tasks(&self, session: &Session) -> HttpRequest {
        self.request(HttpMethod::Get, self.url(&ITEMS_PATH), session, None)
    }

    /// # Errors
    ///
    /// Returns `ClientError::InvalidTaskId` for an empty, `.` or `..` id.
    pub fn build_read_task(&self, session: &Session, task_id: &str) -> Result<HttpRequest> {
        Ok(self.request(HttpMethod::Get, self.item_url(task_id)?, session, None))
    }

    /// # Errors
    ///
    /// Returns `ClientError::InvalidTaskId` for an empty, `.` or `..` id, or
    /// `ClientError::Json` if the payload cannot be serialized.
    pub fn build_update_task(&self, session: &Session, task_id: &str, done: bool) -> Result<HttpRequest> {
        let url = self.item_url(task_id)?;
        let body = serde_json::to_string(&TaskUpdate { done })?;
        Ok(self.request(HttpMethod::Put, url, session, Some(body)))
    }

    /// # Errors
    ///
    /// Returns `ClientError::InvalidTaskId` for an empty, `.` or `..` id.
    pub fn build_delete_task(&self, session: &Session, task_id: &str) -> Result<HttpRequest> {
        Ok(self.request(HttpMethod::Delete, self.item_url(task_id)?, session, None))
    }

    pub fn build_read_current_user(&self, session: &Session) -> HttpRequest {
        self.request(HttpMethod::Get, self.url(&USER_PATH), session, None)
    }

    // -- operations --

    /// POST a new task with `Text` and `Date`.
    ///
    /// # Errors
    ///
    /// Fails only if the request could not be serialized or sent.
    pub fn create_task(&self, session: &Session, text: &str, date: &str) -> Result<HttpResponse> {
        let request = self.build_create_task(session, text, date)?;
        self.execute(&request)
    }

    /// GET every task visible to the session.
    ///
    /// # Errors
    ///
    /// Fails only on transport errors.
    pub fn read_all_tasks(&self, session: &Session) -> Result<HttpResponse> {
        self.execute(&self.build_read_all_tasks(session))
    }

    /// GET a single task by its `_id`.
    ///
    /// # Errors
    ///
    /// Fails on an id that cannot name a task, or on transport errors.
    pub fn read_task(&self, session: &Session, task_id: &str) -> Result<HttpResponse> {
        let request = self.build_read_task(session, task_id)?;
        self.execute(&request)
    }

    /// PUT a partial update setting `Done`.
    ///
    /// # Errors
    ///
    /// Fails on an id that cannot name a task, or if the request could not
    /// be serialized or sent.
    pub fn update_task(&self, session: &Session, task_id: &str, done: bool) -> Result<HttpResponse> {
        let request = self.build_update_task(session, task_id, done)?;
        self.execute(&request)
    }

    /// DELETE a single task by its `_id`.
    ///
    /// # Errors
    ///
    /// Fails on an id that cannot name a task, or on transport errors.
    pub fn delete_task(&self, session: &Session, task_id: &str) -> Result<HttpResponse> {
        let request = self.build_delete_task(session, task_id)?;
        self.execute(&request)
    }

    /// GET the user the session belongs to.
    ///
    /// # Errors
    ///
    /// Fails only on transport errors.
    pub fn read_current_user(&self, session: &Session) -> Result<HttpResponse> {
        self.execute(&self.build_read_current_user(session))
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.send(request).inspect_err(|e| {
            tracing::debug!(method = %request.method, url = %request.url, error = %e, "request failed");
        })?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "received response"
        );
        Ok(response)
    }

    fn request(&self, method: HttpMethod, url: Url, session: &Session, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("cookie".to_string(), session.cookie_header())];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        }
    }

    /// URL of a single task. Empty and dot-segment ids are refused: the URL
    /// parser drops `.`/`..` segments, so they would address the collection.
    fn item_url(&self, task_id: &str) -> Result<Url> {
        if matches!(task_id, "" | "." | "..") {
            return Err(ClientError::InvalidTaskId(task_id.to_string()));
        }
        let mut url = self.url(&ITEMS_PATH);
        if let Ok(mut path) = url.path_segments_mut() {
            path.push(task_id);
        }
        Ok(url)
    }

    /// Append `segments` to the base URL's path, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `with_transport` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
