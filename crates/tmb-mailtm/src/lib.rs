//! mail.tm adapter.
//!
//! Implements the `tmb-core` [`MailProvider`] port over the mail.tm REST API
//! (hydra-style JSON collections, bearer auth for mailbox endpoints).

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use tracing::debug;

use tmb_core::{
    errors::Error,
    mail::{
        port::MailProvider,
        types::{MailMessage, MessageSummary},
    },
    Result,
};

#[derive(Debug, Deserialize)]
struct HydraCollection<T> {
    #[serde(rename = "hydra:member", default = "Vec::new")]
    member: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Domain {
    domain: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Clone, Debug)]
pub struct MailTmClient {
    base_url: String,
    http: reqwest::Client,
}

impl MailTmClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("mail.tm http client build failed: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, what: &str, req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let resp = req
            .send()
            .await
            .map_err(|e| Error::ProviderUnavailable(format!("mail.tm {what} request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::ProviderUnavailable(format!(
                "mail.tm {what} failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        debug!(what, status = %resp.status(), "mail.tm call ok");
        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        what: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<T> {
        self.send(what, req)
            .await?
            .json::<T>()
            .await
            .map_err(|e| Error::ProviderUnavailable(format!("mail.tm {what} json error: {e}")))
    }
}

#[async_trait]
impl MailProvider for MailTmClient {
    async fn list_domains(&self) -> Result<Vec<String>> {
        let page: HydraCollection<Domain> = self
            .send_json("list domains", self.http.get(self.url("/domains")))
            .await?;
        Ok(page.member.into_iter().map(|d| d.domain).collect())
    }

    async fn create_account(&self, address: &str, password: &str) -> Result<()> {
        let req = self
            .http
            .post(self.url("/accounts"))
            .json(&json!({ "address": address, "password": password }));
        self.send("create account", req).await?;
        Ok(())
    }

    async fn authenticate(&self, address: &str, password: &str) -> Result<String> {
        let req = self
            .http
            .post(self.url("/token"))
            .json(&json!({ "address": address, "password": password }));
        let resp: TokenResponse = self.send_json("token", req).await?;
        if resp.token.trim().is_empty() {
            return Err(Error::ProviderUnavailable(
                "mail.tm token returned empty token".to_string(),
            ));
        }
        Ok(resp.token)
    }

    async fn list_messages(&self, token: &str) -> Result<Vec<MessageSummary>> {
        let req = self.http.get(self.url("/messages")).bearer_auth(token);
        let page: HydraCollection<MessageSummary> = self.send_json("list messages", req).await?;
        Ok(page.member)
    }

    async fn read_message(&self, token: &str, id: &str) -> Result<MailMessage> {
        let req = self
            .http
            .get(self.url(&format!("/messages/{id}")))
            .bearer_auth(token);
        self.send_json("read message", req).await
    }

    async fn delete_message(&self, token: &str, id: &str) -> Result<()> {
        let req = self
            .http
            .delete(self.url(&format!("/messages/{id}")))
            .bearer_auth(token);
        self.send("delete message", req).await?;
        Ok(())
    }
}
