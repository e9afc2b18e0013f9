use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

pub const ACCEPTED: &str = "Accepted";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
	pub title: String,
	pub title_slug: String,
	pub status_display: String,
	#[serde(deserialize_with = "deserialize_timestamp")]
	pub timestamp: i64,
	pub lang: String,
}

impl Submission {
	pub fn is_accepted(&self) -> bool {
		self.status_display == ACCEPTED
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
	Number(i64),
	Text(String),
}

// LeetCode sends the timestamp as a numeric string
fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
	match RawTimestamp::deserialize(deserializer)? {
		RawTimestamp::Number(value) => Ok(value),
		RawTimestamp::Text(value) => value.trim().parse().map_err(serde::de::Error::custom),
	}
}

/// Today's accepted submissions, one per problem.
///
/// Keeps entries at or after `start_of_day` whose status is exactly
/// `Accepted`, then drops every later entry for a slug already seen.
/// Survivors stay in provider order.
pub fn todays_accepted(submissions: Vec<Submission>, start_of_day: i64) -> Vec<Submission> {
	let mut seen = HashSet::new();
	submissions.into_iter()
		.filter(|submission| submission.timestamp >= start_of_day)
		.filter(Submission::is_accepted)
		.filter(|submission| seen.insert(submission.title_slug.clone()))
		.collect()
}

pub fn problem_url(slug: &str) -> String {
	format!("https://leetcode.com/problems/{slug}/description/")
}
