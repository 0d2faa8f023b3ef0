//! Scripted generation service for tests.
//!
//! Replays a queue of canned results, then falls back to an optional
//! responder closure. Every request is recorded for later assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use super::client::{GenerationError, GenerationRequest, GenerationService};

type Responder = Box<dyn Fn(&GenerationRequest) -> Result<String, GenerationError> + Send + Sync>;

pub struct ScriptedService {
    name: String,
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    responder: Option<Responder>,
    requests: Mutex<Vec<(Instant, GenerationRequest)>>,
}

impl ScriptedService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            responder: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn then_ok(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn then_err(self, err: GenerationError) -> Self {
        self.push(Err(err));
        self
    }

    /// Answer with a closure once the queue is empty
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&GenerationRequest) -> Result<String, GenerationError> + Send + Sync + 'static,
    {
        self.responder = Some(Box::new(responder));
        self
    }

    fn push(&self, item: Result<String, GenerationError>) {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).push_back(item);
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// When each request arrived (tokio clock, so paused-time tests are exact)
    pub fn call_instants(&self) -> Vec<Instant> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(at, _)| *at)
            .collect()
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let next = self.script.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        let result = match next {
            Some(result) => result,
            None => match &self.responder {
                Some(responder) => responder(&request),
                None => Err(GenerationError::InvalidResponse(format!(
                    "{}: script exhausted",
                    self.name
                ))),
            },
        };
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((Instant::now(), request));
        result
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_script_then_responder() {
        let service = ScriptedService::new("mock")
            .then_ok("first")
            .then_err(GenerationError::Network("down".into()))
            .with_responder(|req| Ok(format!("echo: {}", req.user_prompt)));

        let req = GenerationRequest::new("", "ping", 0.5);
        assert_eq!(service.generate(req.clone()).await.unwrap(), "first");
        assert!(service.generate(req.clone()).await.is_err());
        assert_eq!(service.generate(req).await.unwrap(), "echo: ping");
        assert_eq!(service.call_count(), 3);
        assert_eq!(service.requests()[2].user_prompt, "ping");
    }

    #[tokio::test]
    async fn test_exhausted_script_errors() {
        let service = ScriptedService::new("mock");
        let err = service.generate(GenerationRequest::new("", "x", 0.1)).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }
}
