use std::fmt::{Display, Formatter};

use crate::dashboard::{Dashboard, ProfileSource};
use crate::data::{problem_url, ProfileSnapshot};
use crate::storage::Storage;

pub const FETCHING: &str = "Fetching...";

impl<S: ProfileSource, T: Storage> Display for Dashboard<S, T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "LeetCode Friends")?;
		if self.is_loading() {
			writeln!(f, "{FETCHING}")?;
		}
		if !self.tracked_users().is_empty() {
			let chips: Vec<String> = self.tracked_users().iter()
				.map(|user| format!("[{user}]"))
				.collect();
			writeln!(f, "Tracking: {}", chips.join(" "))?;
		}
		if let Some(error) = self.error_message() {
			writeln!(f, "Error: {error}")?;
		}
		for snapshot in self.snapshots() {
			write!(f, "\n{snapshot}")?;
		}
		Ok(())
	}
}

impl Display for ProfileSnapshot {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "== {} ==", self.username)?;
		writeln!(f, "avatar: {}", self.avatar_url)?;

		let solved: Vec<String> = self.solved.iter()
			.map(|solved| {
				let label: &str = match solved.difficulty {
					Some(difficulty) => <&'static str>::from(difficulty),
					None => &solved.label,
				};
				format!("{label}: {}", solved.count)
			})
			.collect();
		if !solved.is_empty() {
			writeln!(f, "{}", solved.join("  "))?;
		}

		writeln!(f, "Submissions made today: {} submission(s)", self.submissions.len())?;
		if self.submissions.is_empty() {
			writeln!(f, "No submissions today.")?;
		}
		for submission in &self.submissions {
			writeln!(
				f,
				"  - {} ({}) {} {}",
				submission.title,
				submission.lang,
				submission.status_display,
				problem_url(&submission.title_slug)
			)?;
		}
		Ok(())
	}
}
