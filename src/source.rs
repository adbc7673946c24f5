use std::future::Future;

use log::{debug, warn};
use reqwest::{Client, Url};

use crate::render::RenderError;

/// Where track list bodies come from.
pub trait TrackSource {
    /// Issues one GET to `url` and returns the raw response body.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, RenderError>> + Send;
}

/// Fetches track lists from the Mood It server.
///
/// No timeout is configured and failed requests are not retried.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        HttpSource {
            client: Client::new(),
        }
    }
}

impl TrackSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<String, RenderError> {
        let request = self.client.get(url.clone()).build()?;
        let resp = self.client.execute(request).await?;
        let status = resp.status();
        if !status.is_success() {
            // the body is still rendered, error objects fall back to the placeholder
            warn!("{url} answered with {status}");
        }
        let body = resp.text().await?;
        debug!("Received {} bytes from {url}", body.len());
        Ok(body)
    }
}
