//! Issues a single request for a target and measures it.
use async_trait::async_trait;
use reqwest::Client;
use tokio::time::Instant;

use crate::{
    peck::{Target, Verb},
    report::HitRecord,
};

/// Fires one request per call.
///
/// Implementations never fail: transport errors and error statuses are recorded as a
/// failed [`HitRecord`].
#[async_trait]
pub trait Executor: Send + Sync {
    /// Sends `verb` to `base_url` + `target.path` and measures it.
    async fn execute(&self, base_url: &str, verb: Verb, target: &Target) -> HitRecord;
}

/// An [`Executor`] backed by a pooled [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Creates an executor with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    async fn send(&self, url: String, verb: Verb, target: &Target) -> reqwest::Result<()> {
        let req = match verb {
            Verb::Get => self.client.get(url),
            Verb::Post => match &target.body {
                Some(body) => self.client.post(url).json(body),
                None => self.client.post(url),
            },
        };
        let resp = req.send().await?.error_for_status()?;
        resp.bytes().await?;
        Ok(())
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, base_url: &str, verb: Verb, target: &Target) -> HitRecord {
        let url = format!("{base_url}{}", target.path);

        let t = Instant::now();
        let res = self.send(url, verb, target).await;
        let duration = t.elapsed();

        match res {
            Ok(()) => HitRecord::success(duration),
            Err(e) => {
                tracing::debug!(%verb, path = %target.path, error = %e, "request failed");
                HitRecord::failure(duration)
            }
        }
    }
}
