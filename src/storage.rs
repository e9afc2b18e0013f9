use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

pub const TRACKED_USERS_KEY: &str = "leetcodeUserList";

/// String key-value persistence, the shape of browser local storage.
pub trait Storage {
	fn get_item(&self, key: &str) -> Result<Option<String>>;
	fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
	items: std::sync::Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_item(key: &str, value: &str) -> Self {
		let storage = Self::new();
		if let Ok(mut items) = storage.items.lock() {
			items.insert(key.to_string(), value.to_string());
		}
		storage
	}
}

#[cfg(test)]
impl Storage for MemoryStorage {
	fn get_item(&self, key: &str) -> Result<Option<String>> {
		let items = self.items.lock().map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
		Ok(items.get(key).cloned())
	}

	fn set_item(&self, key: &str, value: &str) -> Result<()> {
		let mut items = self.items.lock().map_err(|_| anyhow::anyhow!("storage lock poisoned"))?;
		items.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// Items kept as one JSON object on disk.
pub struct FileStorage {
	path: PathBuf,
}

impl FileStorage {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	fn read_all(&self) -> Result<BTreeMap<String, String>> {
		if !self.path.exists() {
			return Ok(BTreeMap::new());
		}
		let buf = fs::read(&self.path)
			.with_context(|| format!("reading {}", self.path.display()))?;
		serde_json::from_slice(&buf)
			.with_context(|| format!("parsing {}", self.path.display()))
	}
}

impl Storage for FileStorage {
	fn get_item(&self, key: &str) -> Result<Option<String>> {
		Ok(self.read_all()?.remove(key))
	}

	fn set_item(&self, key: &str, value: &str) -> Result<()> {
		// a corrupt file is replaced rather than blocking every write
		let mut items = self.read_all().unwrap_or_default();
		items.insert(key.to_string(), value.to_string());
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(&self.path, serde_json::to_string_pretty(&items)?)
			.with_context(|| format!("writing {}", self.path.display()))
	}
}

/// Ordered, duplicate-free list of usernames, persisted on every change.
pub struct TrackedUsers<T: Storage> {
	storage: T,
	users: Vec<String>,
}

impl<T: Storage> TrackedUsers<T> {
	/// Restores the list, empty when it is absent or unreadable.
	pub fn load(storage: T) -> Self {
		let users = match storage.get_item(TRACKED_USERS_KEY) {
			Ok(Some(stored)) => serde_json::from_str::<Vec<String>>(&stored).unwrap_or_else(|err| {
				warn!(error = %err, "Ignoring unparsable tracked user list");
				Vec::new()
			}),
			Ok(None) => Vec::new(),
			Err(err) => {
				warn!(error = %err, "Could not read tracked user list");
				Vec::new()
			}
		};
		let mut tracked = Self { storage, users: Vec::new() };
		for user in users {
			if !tracked.contains(&user) {
				tracked.users.push(user);
			}
		}
		tracked
	}

	pub fn as_slice(&self) -> &[String] {
		&self.users
	}

	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.users.iter().any(|user| user == name)
	}

	pub fn add(&mut self, name: &str) -> bool {
		if self.contains(name) {
			return false;
		}
		self.users.push(name.to_string());
		self.persist();
		true
	}

	pub fn remove(&mut self, name: &str) -> bool {
		let before = self.users.len();
		self.users.retain(|user| user != name);
		let removed = self.users.len() != before;
		if removed {
			self.persist();
		}
		removed
	}

	#[cfg(test)]
	pub fn storage(&self) -> &T {
		&self.storage
	}

	fn persist(&self) {
		let result = serde_json::to_string(&self.users)
			.map_err(anyhow::Error::from)
			.and_then(|encoded| self.storage.set_item(TRACKED_USERS_KEY, &encoded));
		if let Err(err) = result {
			warn!(error = %err, "Could not persist tracked user list");
		}
	}
}
