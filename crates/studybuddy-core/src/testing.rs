//! In-memory backend and notifier for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::backend::{Backend, FragmentStream, ModelDescriptor};
use crate::error::BackendError;
use crate::models::ModelName;
use crate::notify::{Notifier, Severity};

pub(crate) fn names(names: &[&str]) -> Vec<ModelName> {
    names.iter().filter_map(|n| ModelName::new(*n)).collect()
}

/// Serve one `200 OK` NDJSON response on a loopback port and return its URL.
pub(crate) async fn serve_ndjson(lines: &[&str]) -> String {
    let body: String = lines.iter().map(|line| format!("{}\n", line)).collect();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/x-ndjson\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        // Read the whole request (headers plus JSON body) before answering.
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&request[..end]).to_lowercase();
                let length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

/// Backend with canned answers.
pub(crate) struct FakeBackend {
    models: Result<Vec<ModelDescriptor>, BackendError>,
    generation: Result<Vec<Result<String, BackendError>>, BackendError>,
    list_calls: AtomicUsize,
    prompts: Mutex<Vec<(String, String)>>,
}

impl FakeBackend {
    pub(crate) fn with_models(models: Vec<ModelDescriptor>) -> Self {
        Self {
            models: Ok(models),
            generation: Ok(Vec::new()),
            list_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_list(error: BackendError) -> Self {
        Self {
            models: Err(error),
            ..Self::with_models(Vec::new())
        }
    }

    pub(crate) fn with_fragments(fragments: &[&str]) -> Self {
        Self::with_stream(fragments.iter().map(|f| Ok(f.to_string())).collect())
    }

    pub(crate) fn with_stream(items: Vec<Result<String, BackendError>>) -> Self {
        Self {
            generation: Ok(items),
            ..Self::with_models(Vec::new())
        }
    }

    pub(crate) fn failing_generate(error: BackendError) -> Self {
        Self {
            generation: Err(error),
            ..Self::with_models(Vec::new())
        }
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// `(model, prompt)` pairs passed to `generate`.
    pub(crate) fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.models.clone()
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<FragmentStream, BackendError> {
        self.prompts
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        let items = self.generation.clone()?;
        Ok(stream::iter(items).boxed())
    }
}

/// Notifier that remembers everything it was told.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
