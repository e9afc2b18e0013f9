use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::provider::{ProfileProvider, ProviderError};

pub const LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const USER_AGENT: &str = concat!("leetfriends/", env!("CARGO_PKG_VERSION"));

const RECENT_SUBMISSION_LIMIT: u32 = 20;

const USER_PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!, $limit: Int) {
	allQuestionsCount {
		difficulty
		count
	}
	matchedUser(username: $username) {
		username
		profile {
			realName
			userAvatar
			ranking
			reputation
			countryName
			aboutMe
		}
		submissionCalendar
		submitStats {
			acSubmissionNum {
				difficulty
				count
				submissions
			}
			totalSubmissionNum {
				difficulty
				count
				submissions
			}
		}
	}
	recentSubmissionList(username: $username, limit: $limit) {
		title
		titleSlug
		timestamp
		statusDisplay
		lang
	}
}
"#;

#[derive(Serialize)]
struct GraphqlRequest<'a> {
	query: &'a str,
	variables: UserVariables<'a>,
}

#[derive(Serialize)]
struct UserVariables<'a> {
	username: &'a str,
	limit: u32,
}

#[derive(Deserialize, Default)]
struct GraphqlResponse {
	#[serde(default)]
	data: Option<Value>,
	#[serde(default)]
	errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
	message: String,
}

impl GraphqlResponse {
	// An unknown user still comes back as `data` with `matchedUser: null`
	fn into_profile(self) -> Result<Value, ProviderError> {
		match self.data {
			Some(data) if !data.is_null() => Ok(data),
			_ => match self.errors.into_iter().next() {
				Some(error) => Err(ProviderError::Graphql(error.message)),
				None => Err(ProviderError::Unknown),
			},
		}
	}
}

/// `ProfileProvider` backed by the public LeetCode GraphQL API.
#[derive(Debug, Clone)]
pub struct LeetCodeClient {
	client: Client,
	url: String,
}

impl LeetCodeClient {
	pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
		Ok(Self {
			client: ClientBuilder::new()
				.connect_timeout(Duration::from_secs(10))
				.timeout(Duration::from_secs(10))
				.user_agent(USER_AGENT)
				.build()?,
			url: url.into(),
		})
	}
}

#[async_trait]
impl ProfileProvider for LeetCodeClient {
	async fn user(&self, username: &str) -> Result<Value, ProviderError> {
		let request = GraphqlRequest {
			query: USER_PROFILE_QUERY,
			variables: UserVariables { username, limit: RECENT_SUBMISSION_LIMIT },
		};
		let response = self.client
			.post(&self.url)
			.header("Referer", "https://leetcode.com")
			.json(&request)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(ProviderError::Status { status: status.as_u16(), body });
		}

		debug!(username, "LeetCode profile fetched");
		response.json::<GraphqlResponse>().await?.into_profile()
	}
}
