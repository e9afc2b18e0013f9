use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

use crate::data::{todays_accepted, Submission};

/// Typed view over the profile JSON relayed by the proxy.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
	#[serde(default)]
	pub matched_user: Option<MatchedUser>,
	#[serde(default)]
	pub recent_submission_list: Option<Vec<Submission>>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
	pub username: String,
	#[serde(default)]
	pub profile: Option<UserProfile>,
	#[serde(default)]
	pub submit_stats: SubmitStats,
	#[serde(default)]
	pub submission_calendar: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	#[serde(default)]
	pub user_avatar: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
	#[serde(default)]
	pub ac_submission_num: Vec<SubmissionStats>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmissionStats {
	pub difficulty: String,
	pub count: u64,
}

#[derive(EnumString, IntoStaticStr, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
	All,
	Easy,
	Medium,
	Hard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolvedCount {
	pub label: String,
	pub difficulty: Option<Difficulty>,
	pub count: u64,
}

impl From<SubmissionStats> for SolvedCount {
	fn from(value: SubmissionStats) -> Self {
		Self {
			difficulty: value.difficulty.parse().ok(),
			label: value.difficulty,
			count: value.count,
		}
	}
}

/// The most recently fetched statistics for one tracked user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileSnapshot {
	pub username: String,
	pub avatar_url: String,
	pub solved: Vec<SolvedCount>,
	pub submissions: Vec<Submission>,
}

impl ProfileSnapshot {
	/// Returns `None` when the profile lacks `matchedUser` or `matchedUser.profile`.
	pub fn from_profile(data: ProfileData, start_of_day: i64) -> Option<Self> {
		let matched_user = data.matched_user?;
		let profile = matched_user.profile?;
		Some(Self {
			username: matched_user.username,
			avatar_url: profile.user_avatar,
			solved: matched_user.submit_stats.ac_submission_num.into_iter()
				.map(SolvedCount::from)
				.collect(),
			submissions: todays_accepted(data.recent_submission_list.unwrap_or_default(), start_of_day),
		})
	}
}
