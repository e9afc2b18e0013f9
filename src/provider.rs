mod leetcode;
mod traits;

pub use leetcode::*;
pub use traits::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
	#[error("{0}")]
	Request(#[from] reqwest::Error),

	#[error("LeetCode responded with status {status}: {body}")]
	Status { status: u16, body: String },

	#[error("{0}")]
	Graphql(String),

	#[error("unknown provider failure")]
	Unknown,
}

impl ProviderError {
	/// Human-readable failure message, `None` when the failure carries none.
	pub fn message(&self) -> Option<String> {
		match self {
			ProviderError::Unknown => None,
			other => Some(other.to_string()),
		}
	}
}
