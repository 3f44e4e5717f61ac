//! In-memory [`DiscogsApi`] backend for tests.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::client::DiscogsApi;
use super::error::{ApiError, ApiResult};
use super::model::RawRelease;

/// A canned backend answer.
#[derive(Debug, Clone)]
pub enum Canned<T> {
    Ok(T),
    /// Non-success HTTP status with a body.
    Status(u16, &'static str),
    /// A body that is not valid JSON.
    Malformed,
}

impl<T: Default> Default for Canned<T> {
    fn default() -> Self {
        Self::Ok(T::default())
    }
}

impl<T: Clone> Canned<T> {
    fn produce(&self) -> ApiResult<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Status(status, body) => Err(ApiError::status(*status, *body)),
            Self::Malformed => Err(ApiError::from(
                serde_json::from_str::<Value>("{\"lowest_price\":").unwrap_err(),
            )),
        }
    }
}

/// Mock backend counting every remote call it receives.
#[derive(Debug, Default)]
pub struct MockApi {
    search: Canned<Vec<Value>>,
    release: Canned<RawRelease>,
    marketplace: Canned<Value>,
    calls: AtomicUsize,
    last_currency: Mutex<Option<String>>,
}

impl MockApi {
    pub fn with_search(mut self, answer: Canned<Vec<Value>>) -> Self {
        self.search = answer;
        self
    }

    pub fn with_release(mut self, answer: Canned<RawRelease>) -> Self {
        self.release = answer;
        self
    }

    pub fn with_marketplace(mut self, answer: Canned<Value>) -> Self {
        self.marketplace = answer;
        self
    }

    /// Number of remote calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Currency passed to the most recent marketplace call.
    pub fn last_currency(&self) -> Option<String> {
        self.last_currency.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiscogsApi for MockApi {
    fn search(&self, _query: &str) -> ApiResult<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.search.produce()
    }

    fn release(&self, _release_id: u64) -> ApiResult<RawRelease> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.produce()
    }

    async fn marketplace_stats(&self, _release_id: u64, currency: &str) -> ApiResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_currency.lock().unwrap() = Some(currency.to_string());
        self.marketplace.produce()
    }
}

/// Collects formatted log output emitted on the current thread.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's events here until the guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
