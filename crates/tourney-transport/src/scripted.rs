//! A transport that answers from a script instead of the network.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{HttpRequest, HttpResponse, Method, Transport, TransportError};

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
}

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<(Method, String), VecDeque<Reply>>,
    requests: Vec<HttpRequest>,
}

/// Answers requests with responses scripted per `(method, path)`.
///
/// Replies for the same route are served in order; the last one keeps
/// being served, so a list that is re-fetched after a delete can be
/// scripted once or twice. Unscripted routes fail with
/// [`TransportError::NoResponse`]. Every request is recorded as
/// dispatched, after interceptors ran.
///
/// Cloning shares the script and the recorded requests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with a JSON (or empty) body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        let mut response = HttpResponse::new(status, body.as_bytes().to_vec());
        if !body.is_empty() {
            response.headers.insert("content-type", "application/json");
        }
        self.push(method, path, Reply::Respond(response))
    }

    /// Queues a transport failure.
    pub fn fail(&self, method: Method, path: &str, error: TransportError) -> &Self {
        self.push(method, path, Reply::Fail(error))
    }

    /// Returns every request dispatched so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Returns the most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.lock().requests.last().cloned()
    }

    /// Returns the requests dispatched to one route.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.lock()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panic while holding the lock only happens inside a failing test.
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn answer(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut script = self.lock();
        let key = (request.method, request.path.clone());
        script.requests.push(request);

        let reply = match script.replies.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(error)) => Err(error),
            None => Err(TransportError::NoResponse(format!(
                "no scripted reply for {} {}",
                key.0, key.1
            ))),
        }
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.answer(request)
    }
}
