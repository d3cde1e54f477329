use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::{Notifier, NotifierError, NotifierResult, Protocol};

/// Client for a single topic of an HTTP publish/subscribe notification service.
#[derive(Debug)]
pub struct HttpNotifier {
    http_client: Client,
    endpoint: Url,
    topic: String,
    auth_token: Option<SecretString>,
}

impl HttpNotifier {
    pub fn new<S: AsRef<str>>(
        endpoint: S,
        topic: String,
        auth_token: Option<SecretString>,
        timeout: std::time::Duration,
    ) -> NotifierResult<Self> {
        let endpoint = Url::parse(endpoint.as_ref())
            .map_err(|e| NotifierError::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(HttpNotifier {
            http_client,
            endpoint,
            topic,
            auth_token,
        })
    }

    /// `{endpoint}/topics/{topic}/{resource}`
    fn topic_url(&self, resource: &str) -> NotifierResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| NotifierError::UrlParsing(format!("not a base url: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(["topics", self.topic.as_str(), resource]);
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
impl Notifier for HttpNotifier {
    async fn publish(&self, subject: &str, message: &str) -> NotifierResult<()> {
        let url = self.topic_url("messages")?;

        let _resp = self
            .authorize(self.http_client.post(url))
            .json(&PublishRequest { subject, message })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn subscribe(&self, protocol: Protocol, endpoint: &str) -> NotifierResult<()> {
        let url = self.topic_url("subscriptions")?;

        let _resp = self
            .authorize(self.http_client.post(url))
            .json(&SubscribeRequest {
                protocol: protocol.as_ref(),
                endpoint,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishRequest<'a> {
    pub subject: &'a str,
    pub message: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubscribeRequest<'a> {
    pub protocol: &'a str,
    pub endpoint: &'a str,
}
