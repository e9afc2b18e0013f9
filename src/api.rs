use serde::{Deserialize, Serialize};

pub const PROFILE_PATH: &str = "/api/leetcode";

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const FAILED_TO_FETCH_PROFILE: &str = "Failed to fetch profile";
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Body of every error the proxy returns.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorEnvelope {
	pub error: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
}

impl ErrorEnvelope {
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			details: None,
		}
	}

	pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			details: Some(details.into()),
		}
	}
}
