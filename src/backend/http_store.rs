use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::{ObjectStore, StoreError, StoreResult};

/// Object store client speaking path-style, S3 compatible HTTP:
/// objects live at `{endpoint}/{bucket}/{key}`.
#[derive(Debug)]
pub struct HttpObjectStore {
    http_client: Client,
    endpoint: Url,
    bucket: String,
    auth_token: Option<SecretString>,
}

impl HttpObjectStore {
    pub fn new<S: AsRef<str>>(
        endpoint: S,
        bucket: String,
        auth_token: Option<SecretString>,
        timeout: std::time::Duration,
    ) -> StoreResult<Self> {
        let endpoint =
            Url::parse(endpoint.as_ref()).map_err(|e| StoreError::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(HttpObjectStore {
            http_client,
            endpoint,
            bucket,
            auth_token,
        })
    }

    fn object_url(&self, key: &str) -> StoreResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::UrlParsing(format!("not a base url: {}", self.endpoint)))?
            .pop_if_empty()
            .extend([self.bucket.as_str(), key]);
        Ok(url)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let url = self.object_url(key)?;

        let resp = self.authorize(self.http_client.get(url)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!("{:<12} - no object stored under '{key}'", "OBJECT_STORE");
            return Ok(None);
        }

        let body = resp.error_for_status()?.bytes().await?;
        Ok(Some(body.to_vec()))
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> StoreResult<()> {
        let url = self.object_url(key)?;

        let _resp = self
            .authorize(self.http_client.put(url))
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
