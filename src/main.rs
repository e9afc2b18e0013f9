use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use endpoints::*;

use crate::config::Config;
use crate::dashboard::{Dashboard, ProxyClient, FETCHING};
use crate::provider::{LeetCodeClient, ProfileProvider};
use crate::storage::FileStorage;

mod api;
mod config;
mod dashboard;
mod data;
mod endpoints;
mod provider;
mod storage;

pub struct AppState {
	pub provider: Arc<dyn ProfileProvider>,
}

#[derive(Parser)]
#[command(name = "leetfriends", version, about = "Track today's accepted LeetCode submissions of your friends")]
struct Cli {
	/// Profile proxy the dashboard talks to
	#[arg(long, global = true)]
	proxy_url: Option<String>,

	/// File holding the tracked user list
	#[arg(long, global = true)]
	store: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Run the profile proxy
	Serve {
		#[arg(long)]
		host: Option<String>,
		#[arg(long)]
		port: Option<u16>,
	},
	/// Fetch and show every tracked user
	Show,
	/// Start tracking a user
	Add { username: String },
	/// Stop tracking a user
	Remove { username: String },
}

async fn serve(config: Config) -> anyhow::Result<()> {
	let provider: Arc<dyn ProfileProvider> = Arc::new(LeetCodeClient::new(config.graphql_url.clone())?);

	info!(host = %config.host, port = config.port, "Starting profile proxy");
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.app_data(web::Data::new(AppState {
				provider: provider.clone()
			}))
			.service(leetcode_profile)
	}).bind((config.host.as_str(), config.port))?
		.run()
		.await?;
	Ok(())
}

fn open(config: &Config) -> anyhow::Result<(ProxyClient, FileStorage)> {
	Ok((ProxyClient::new(config.proxy_url.clone())?, FileStorage::new(config.store_path.clone())))
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
	let mut config = Config::load();
	if let Some(proxy_url) = cli.proxy_url {
		config.proxy_url = proxy_url;
	}
	if let Some(store) = cli.store {
		config.store_path = store;
	}

	let dashboard = match cli.command {
		Command::Serve { host, port } => {
			if let Some(host) = host {
				config.host = host;
			}
			if let Some(port) = port {
				config.port = port;
			}
			serve(config).await?;
			return Ok(true);
		}
		Command::Show => {
			let (source, storage) = open(&config)?;
			println!("{FETCHING}");
			Dashboard::initialize(source, storage).await
		}
		Command::Add { username } => {
			let (source, storage) = open(&config)?;
			println!("{FETCHING}");
			let mut dashboard = Dashboard::initialize(source, storage).await;
			dashboard.username = username;
			// the error is kept on the dashboard and rendered below
			let _ = dashboard.submit().await;
			dashboard
		}
		Command::Remove { username } => {
			let (source, storage) = open(&config)?;
			let mut dashboard = Dashboard::restore(source, storage);
			dashboard.remove_user(&username);
			dashboard
		}
	};

	print!("{dashboard}");
	Ok(dashboard.error_message().is_none())
}

#[actix_web::main]
async fn main() -> anyhow::Result<ExitCode> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();
	Ok(if run(cli).await? { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
