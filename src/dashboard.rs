mod client;
mod render;

pub use client::*;
pub use render::*;

use thiserror::Error;
use tracing::{info, warn};

use crate::data::time::start_of_today;
use crate::data::{ProfileData, ProfileSnapshot};
use crate::storage::{Storage, TrackedUsers};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
	#[error("{0}")]
	InvalidUsername(String),

	#[error("{0}")]
	PartialFetchFailure(String),
}

// Err carries the proxy's own error message, if any
fn parse_reply(reply: ProxyReply, start_of_day: i64) -> Result<ProfileSnapshot, Option<String>> {
	let proxy_error = reply.error_message();
	if !reply.ok {
		return Err(proxy_error);
	}
	serde_json::from_value::<ProfileData>(reply.body)
		.ok()
		.and_then(|data| ProfileSnapshot::from_profile(data, start_of_day))
		.ok_or(proxy_error)
}

/// Tracked users and their latest profile snapshots.
///
/// Every operation takes `&mut self`, so at most one fetch cycle runs per
/// dashboard at a time.
pub struct Dashboard<S: ProfileSource, T: Storage> {
	source: S,
	/// Draft of the username input.
	pub username: String,
	tracked: TrackedUsers<T>,
	snapshots: Vec<ProfileSnapshot>,
	error_message: Option<String>,
	is_loading: bool,
}

impl<S: ProfileSource, T: Storage> Dashboard<S, T> {
	/// Restores the tracked list without fetching anything.
	pub fn restore(source: S, storage: T) -> Self {
		Self {
			source,
			username: String::new(),
			tracked: TrackedUsers::load(storage),
			snapshots: Vec::new(),
			error_message: None,
			is_loading: false,
		}
	}

	/// Restores the tracked list and fetches every tracked profile.
	pub async fn initialize(source: S, storage: T) -> Self {
		let mut dashboard = Self::restore(source, storage);
		if !dashboard.tracked.is_empty() {
			if let Err(err) = dashboard.refetch_all().await {
				warn!(error = %err, "Initial fetch failed");
			}
		}
		dashboard
	}

	pub fn tracked_users(&self) -> &[String] {
		self.tracked.as_slice()
	}

	pub fn snapshots(&self) -> &[ProfileSnapshot] {
		&self.snapshots
	}

	pub fn error_message(&self) -> Option<&str> {
		self.error_message.as_deref()
	}

	pub fn is_loading(&self) -> bool {
		self.is_loading
	}

	#[cfg(test)]
	pub fn storage(&self) -> &T {
		self.tracked.storage()
	}

	/// Adds the user typed into the draft.
	pub async fn submit(&mut self) -> Result<(), DashboardError> {
		let draft = self.username.clone();
		self.add_user(&draft).await
	}

	/// Validates `name` against the proxy and starts tracking it.
	///
	/// A blank or already tracked name is ignored. The new snapshot is
	/// appended to the existing ones; nothing else is refetched.
	pub async fn add_user(&mut self, name: &str) -> Result<(), DashboardError> {
		let name = name.trim();
		if name.is_empty() || self.tracked.contains(name) {
			return Ok(());
		}

		self.is_loading = true;
		self.error_message = None;

		let result = match self.source.fetch(name).await {
			Ok(reply) => parse_reply(reply, start_of_today())
				.map_err(|message| DashboardError::InvalidUsername(message.unwrap_or_else(|| format!("Invalid username: {name}")))),
			Err(err) => Err(DashboardError::InvalidUsername(err.to_string())),
		};

		let result = match result {
			Ok(snapshot) => {
				self.tracked.add(name);
				self.username.clear();
				self.snapshots.push(snapshot);
				info!(username = name, "Tracking user");
				Ok(())
			}
			Err(err) => {
				self.error_message = Some(err.to_string());
				Err(err)
			}
		};
		self.is_loading = false;
		result
	}

	/// Stops tracking `name` and drops its snapshot. No network call.
	pub fn remove_user(&mut self, name: &str) {
		self.tracked.remove(name);
		self.snapshots.retain(|snapshot| snapshot.username != name);
	}

	pub async fn refetch_all(&mut self) -> Result<(), DashboardError> {
		let users = self.tracked.as_slice().to_vec();
		self.refetch(&users).await
	}

	/// Rebuilds the snapshots for `users`, one fetch at a time and in order.
	///
	/// The first failure aborts the cycle and leaves the snapshots empty.
	pub async fn refetch(&mut self, users: &[String]) -> Result<(), DashboardError> {
		self.error_message = None;
		self.is_loading = true;
		self.snapshots.clear();

		let result = self.fetch_all(users).await;
		self.is_loading = false;
		match result {
			Ok(snapshots) => {
				self.snapshots = snapshots;
				Ok(())
			}
			Err(err) => {
				self.error_message = Some(err.to_string());
				Err(err)
			}
		}
	}

	async fn fetch_all(&self, users: &[String]) -> Result<Vec<ProfileSnapshot>, DashboardError> {
		let mut snapshots = Vec::with_capacity(users.len());
		for name in users {
			let reply = self.source.fetch(name)
				.await
				.map_err(|err| DashboardError::PartialFetchFailure(err.to_string()))?;
			let snapshot = parse_reply(reply, start_of_today())
				.map_err(|message| DashboardError::PartialFetchFailure(message.unwrap_or_else(|| format!("Failed to fetch for {name}"))))?;
			snapshots.push(snapshot);
		}
		Ok(snapshots)
	}
}

#[cfg(test)]
mod tests {
	use chrono::Local;
	use mockall::predicate::eq;
	use mockall::Sequence;
	use serde_json::{json, Value};

	use super::*;
	use crate::storage::{MemoryStorage, TRACKED_USERS_KEY};

	fn profile(username: &str, submissions: Value) -> Value {
		json!({
			"matchedUser": {
				"username": username,
				"profile": {"userAvatar": format!("https://assets.leetcode.com/{username}.png")},
				"submitStats": {"acSubmissionNum": [
					{"difficulty": "All", "count": 3},
					{"difficulty": "Easy", "count": 3}
				]}
			},
			"recentSubmissionList": submissions
		})
	}

	fn stored(users: &str) -> MemoryStorage {
		MemoryStorage::with_item(TRACKED_USERS_KEY, users)
	}

	fn persisted<S: ProfileSource>(dashboard: &Dashboard<S, MemoryStorage>) -> Option<String> {
		dashboard.storage().get_item(TRACKED_USERS_KEY).unwrap()
	}

	#[tokio::test]
	async fn initialize_without_users_does_not_fetch() {
		let mut source = MockProfileSource::new();
		source.expect_fetch().never();

		let dashboard = Dashboard::initialize(source, MemoryStorage::new()).await;
		assert!(dashboard.tracked_users().is_empty());
		assert!(dashboard.snapshots().is_empty());
		assert_eq!(dashboard.error_message(), None);
	}

	#[tokio::test]
	async fn initialize_fetches_in_order() {
		let mut seq = Sequence::new();
		let mut source = MockProfileSource::new();
		for name in ["bob", "alice"] {
			source.expect_fetch()
				.with(eq(name))
				.times(1)
				.in_sequence(&mut seq)
				.returning(|name| Ok(ProxyReply::ok(profile(name, json!([])))));
		}

		let dashboard = Dashboard::initialize(source, stored(r#"["bob","alice"]"#)).await;
		let names: Vec<&str> = dashboard.snapshots().iter().map(|s| s.username.as_str()).collect();
		assert_eq!(names, vec!["bob", "alice"]);
		assert!(!dashboard.is_loading());
	}

	#[tokio::test]
	async fn add_tracked_user_is_a_no_op() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.with(eq("alice"))
			.times(1)
			.returning(|name| Ok(ProxyReply::ok(profile(name, json!([])))));

		let mut dashboard = Dashboard::initialize(source, stored(r#"["alice"]"#)).await;
		dashboard.add_user("alice").await.unwrap();
		dashboard.add_user("  alice ").await.unwrap();
		assert_eq!(dashboard.tracked_users(), ["alice"]);
		assert_eq!(dashboard.snapshots().len(), 1);
	}

	#[tokio::test]
	async fn add_blank_user_is_a_no_op() {
		let mut source = MockProfileSource::new();
		source.expect_fetch().never();

		let mut dashboard = Dashboard::restore(source, MemoryStorage::new());
		dashboard.username = " \t ".to_string();
		dashboard.submit().await.unwrap();
		assert!(dashboard.tracked_users().is_empty());
		assert_eq!(persisted(&dashboard), None);
	}

	#[tokio::test]
	async fn add_user_appends_and_clears_draft() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.with(eq("alice"))
			.times(1)
			.returning(|name| Ok(ProxyReply::ok(profile(name, json!([])))));

		let mut dashboard = Dashboard::restore(source, MemoryStorage::new());
		dashboard.username = " alice ".to_string();
		dashboard.submit().await.unwrap();
		assert_eq!(dashboard.tracked_users(), ["alice"]);
		assert_eq!(dashboard.username, "");
		assert_eq!(dashboard.snapshots()[0].avatar_url, "https://assets.leetcode.com/alice.png");
		assert_eq!(persisted(&dashboard).as_deref(), Some(r#"["alice"]"#));
	}

	#[tokio::test]
	async fn add_unknown_user_reports_invalid_username() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.returning(|_| Ok(ProxyReply::ok(json!({"matchedUser": null, "recentSubmissionList": null}))));

		let mut dashboard = Dashboard::restore(source, MemoryStorage::new());
		dashboard.username = "ghost".to_string();
		let err = dashboard.submit().await.unwrap_err();
		assert_eq!(err, DashboardError::InvalidUsername("Invalid username: ghost".to_string()));
		assert_eq!(dashboard.error_message(), Some("Invalid username: ghost"));
		assert!(dashboard.tracked_users().is_empty());
		assert_eq!(dashboard.username, "ghost");
		assert!(!dashboard.is_loading());
	}

	#[tokio::test]
	async fn add_user_prefers_proxy_error() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.returning(|_| Ok(ProxyReply::failed(json!({"error": "Failed to fetch profile", "details": "boom"}))));

		let mut dashboard = Dashboard::restore(source, MemoryStorage::new());
		let err = dashboard.add_user("alice").await.unwrap_err();
		assert_eq!(err.to_string(), "Failed to fetch profile");
		assert!(dashboard.tracked_users().is_empty());
	}

	#[tokio::test]
	async fn add_clears_previous_error() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.with(eq("ghost"))
			.returning(|_| Ok(ProxyReply::ok(json!({"matchedUser": null}))));
		source.expect_fetch()
			.with(eq("alice"))
			.returning(|name| Ok(ProxyReply::ok(profile(name, json!([])))));

		let mut dashboard = Dashboard::restore(source, MemoryStorage::new());
		assert!(dashboard.add_user("ghost").await.is_err());
		dashboard.add_user("alice").await.unwrap();
		assert_eq!(dashboard.error_message(), None);
	}

	#[tokio::test]
	async fn remove_user_drops_only_matching_entries() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.times(3)
			.returning(|name| Ok(ProxyReply::ok(profile(name, json!([])))));

		let mut dashboard = Dashboard::initialize(source, stored(r#"["alice","bob","carol"]"#)).await;
		dashboard.remove_user("bob");
		assert_eq!(dashboard.tracked_users(), ["alice", "carol"]);
		let names: Vec<&str> = dashboard.snapshots().iter().map(|s| s.username.as_str()).collect();
		assert_eq!(names, vec!["alice", "carol"]);
		assert_eq!(persisted(&dashboard).as_deref(), Some(r#"["alice","carol"]"#));
	}

	#[tokio::test]
	async fn refetch_failure_discards_partial_results() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.with(eq("alice"))
			.times(1)
			.returning(|name| Ok(ProxyReply::ok(profile(name, json!([])))));
		source.expect_fetch()
			.with(eq("bob"))
			.times(1)
			.returning(|_| Ok(ProxyReply::failed(json!({"error": "Failed to fetch profile", "details": "boom"}))));
		source.expect_fetch()
			.with(eq("carol"))
			.never();

		let dashboard = Dashboard::initialize(source, stored(r#"["alice","bob","carol"]"#)).await;
		assert_eq!(dashboard.error_message(), Some("Failed to fetch profile"));
		assert!(dashboard.snapshots().is_empty());
		assert_eq!(dashboard.tracked_users(), ["alice", "bob", "carol"]);
	}

	#[tokio::test]
	async fn refetch_failure_without_proxy_message() {
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.returning(|_| Ok(ProxyReply::failed(json!({}))));

		let mut dashboard = Dashboard::restore(source, stored(r#"["bob"]"#));
		let err = dashboard.refetch_all().await.unwrap_err();
		assert_eq!(err, DashboardError::PartialFetchFailure("Failed to fetch for bob".to_string()));
	}

	#[tokio::test]
	async fn add_filters_todays_submissions() {
		let now = Local::now().timestamp();
		let yesterday = start_of_today() - 3600;
		let mut source = MockProfileSource::new();
		source.expect_fetch()
			.returning(move |name| Ok(ProxyReply::ok(profile(name, json!([
				{"title": "Two Sum", "titleSlug": "two-sum", "timestamp": now.to_string(), "statusDisplay": "Accepted", "lang": "rust"},
				{"title": "Jump Game", "titleSlug": "jump-game", "timestamp": yesterday.to_string(), "statusDisplay": "Accepted", "lang": "rust"}
			])))));

		let mut dashboard = Dashboard::restore(source, MemoryStorage::new());
		dashboard.add_user("alice").await.unwrap();
		let submissions = &dashboard.snapshots()[0].submissions;
		assert_eq!(submissions.len(), 1);
		assert_eq!(submissions[0].title_slug, "two-sum");
	}
}
