use std::env;
use std::fmt::{Debug, Display};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use crate::provider::LEETCODE_GRAPHQL_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub host: String,
	pub port: u16,
	pub graphql_url: String,
	pub proxy_url: String,
	pub store_path: PathBuf,
}

impl Config {
	pub fn load() -> Self {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		Self {
			host: try_load(&lookup, "LEETFRIENDS_HOST", String::from("127.0.0.1")),
			port: try_load(&lookup, "LEETFRIENDS_PORT", 3000),
			graphql_url: try_load(&lookup, "LEETCODE_GRAPHQL_URL", String::from(LEETCODE_GRAPHQL_URL)),
			proxy_url: try_load(&lookup, "LEETFRIENDS_PROXY_URL", String::from("http://127.0.0.1:3000")),
			store_path: try_load(&lookup, "LEETFRIENDS_STORE", PathBuf::from("leetfriends.json")),
		}
	}
}

fn try_load<T: FromStr + Debug>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
	T::Err: Display,
{
	match lookup(key) {
		Some(value) => value.parse().unwrap_or_else(|e| {
			warn!("Invalid {key} value: {e}, using default: {default:?}");
			default
		}),
		None => {
			info!("{key} not set, using default: {default:?}");
			default
		}
	}
}
