use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use thiserror::Error;

use crate::api::PROFILE_PATH;

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("{0}")]
	Request(#[from] reqwest::Error),
}

/// What the proxy answered: whether the status was a success, and the JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyReply {
	pub ok: bool,
	pub body: Value,
}

impl ProxyReply {
	#[cfg(test)]
	pub fn ok(body: Value) -> Self {
		Self { ok: true, body }
	}

	#[cfg(test)]
	pub fn failed(body: Value) -> Self {
		Self { ok: false, body }
	}

	/// The proxy's `error` field, if it sent a non-empty one.
	pub fn error_message(&self) -> Option<String> {
		self.body.get("error")
			.and_then(Value::as_str)
			.filter(|message| !message.is_empty())
			.map(str::to_string)
	}
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileSource: Send + Sync {
	async fn fetch(&self, username: &str) -> Result<ProxyReply, ClientError>;
}

/// Reaches the profile proxy over HTTP.
#[derive(Debug, Clone)]
pub struct ProxyClient {
	client: Client,
	base_url: String,
}

impl ProxyClient {
	pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
		Ok(Self {
			client: ClientBuilder::new()
				.connect_timeout(Duration::from_secs(10))
				.timeout(Duration::from_secs(10))
				.build()?,
			base_url: base_url.into(),
		})
	}

	fn build_url(&self, username: &str) -> String {
		format!(
			"{}{}?username={}",
			self.base_url.trim_end_matches('/'),
			PROFILE_PATH,
			urlencoding::encode(username)
		)
	}
}

#[async_trait]
impl ProfileSource for ProxyClient {
	async fn fetch(&self, username: &str) -> Result<ProxyReply, ClientError> {
		let response = self.client.get(self.build_url(username)).send().await?;
		let ok = response.status().is_success();
		let body = response.json::<Value>().await?;
		Ok(ProxyReply { ok, body })
	}
}
