use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::provider::ProviderError;

/// Source of public LeetCode profile data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileProvider: Send + Sync {
	/// Fetch the profile of `username`. The result is relayed to clients untouched.
	async fn user(&self, username: &str) -> Result<Value, ProviderError>;
}
