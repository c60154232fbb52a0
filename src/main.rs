//! Pivotal Network resource command-line entry point.
//!
//! Exposes the release query client for out-of-band fixture work (listing,
//! resolving and deleting releases) and a `run` command that drives a
//! check/in/out executable with a payload read from stdin.
//!
//! Everything written to stdout or stderr, logs included, passes through a
//! sanitizer primed with the API token.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{
	io::{self, Write},
	path::{Path, PathBuf},
	process::ExitCode,
};
use tokio::io::AsyncReadExt;

use pivnet_resource::{
	models::{ClientConfig, DEFAULT_ENDPOINT, SANITIZED_API_TOKEN},
	services::{
		pivnet::PivnetClient,
		resource::ResourceRunner,
		sanitizer::{Sanitizer, SecretMapping},
	},
	utils::{format_error_chain, logging::setup_logging},
};

#[derive(Parser)]
#[command(name = "pivnet-resource", version, about = "Pivotal Network release tooling")]
struct Cli {
	/// Pivotal Network endpoint
	#[arg(long, env = "PIVNET_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
	endpoint: String,

	/// API token
	#[arg(long, env = "API_TOKEN", hide_env_values = true, global = true)]
	token: Option<String>,

	/// Product slug
	#[arg(long, env = "PRODUCT_SLUG", global = true)]
	product_slug: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	#[command(flatten)]
	Query(QueryCommand),
	/// Run a check/in/out executable with the payload read from stdin
	Run {
		executable: PathBuf,
		#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
		args: Vec<String>,
	},
}

#[derive(Subcommand)]
enum QueryCommand {
	/// List all releases of the product
	Releases,
	/// List the version of every release
	Versions,
	/// Show the release with the given version
	Find { version: String },
	/// Delete the release with the given version
	Delete { version: String },
	/// List all product files of the product
	ProductFiles,
	/// List the user groups of a release
	UserGroups { release_id: u64 },
}

fn secret_mapping(token: Option<&str>) -> SecretMapping {
	token
		.map(|token| SecretMapping::new([(token, SANITIZED_API_TOKEN)]))
		.unwrap_or_default()
}

#[tokio::main]
async fn main() -> ExitCode {
	dotenvy::dotenv().ok();
	let cli = Cli::parse();
	let token = cli.token.clone();

	setup_logging(Sanitizer::wrap(secret_mapping(token.as_deref()), io::stderr()));

	let mut stdout = Sanitizer::wrap(secret_mapping(token.as_deref()), io::stdout());
	match run(cli, &mut stdout).await {
		Ok(code) => code,
		Err(err) => {
			let mut stderr = Sanitizer::wrap(secret_mapping(token.as_deref()), io::stderr());
			let _ = stderr.write_all(format!("Error: {}\n", format_error_chain(&err)).as_bytes());
			ExitCode::FAILURE
		}
	}
}

async fn run(cli: Cli, stdout: &mut Sanitizer<io::Stdout>) -> anyhow::Result<ExitCode> {
	match &cli.command {
		Command::Run { executable, args } => {
			run_executable(&cli, executable, args, stdout).await
		}
		Command::Query(query) => {
			run_query(&cli, query, stdout).await?;
			Ok(ExitCode::SUCCESS)
		}
	}
}

async fn run_executable(
	cli: &Cli,
	executable: &Path,
	args: &[String],
	stdout: &mut Sanitizer<io::Stdout>,
) -> anyhow::Result<ExitCode> {
	let mut payload = Vec::new();
	tokio::io::stdin()
		.read_to_end(&mut payload)
		.await
		.context("Failed to read payload from stdin")?;

	let runner = ResourceRunner::new(Sanitizer::wrap(
		secret_mapping(cli.token.as_deref()),
		io::stderr(),
	));
	let session = runner.run(executable, args, &payload).await?;
	stdout.write_all(&session.stdout)?;
	stdout.flush()?;

	let code = session.exit_code().unwrap_or(1);
	Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

async fn run_query(
	cli: &Cli,
	query: &QueryCommand,
	stdout: &mut Sanitizer<io::Stdout>,
) -> anyhow::Result<()> {
	let config = ClientConfig::new(cli.endpoint.clone(), cli.token.clone().unwrap_or_default());
	let client = PivnetClient::new(&config)?;
	// a missing slug is rejected by the client before any request
	let slug = cli.product_slug.as_deref().unwrap_or_default();

	match query {
		QueryCommand::Releases => print_json(stdout, &client.list_releases(slug).await?),
		QueryCommand::Versions => print_json(stdout, &client.list_product_versions(slug).await?),
		QueryCommand::Find { version } => {
			print_json(stdout, &client.find_release_by_version(slug, version).await?)
		}
		QueryCommand::Delete { version } => {
			let release = client.delete_release(slug, version).await?;
			tracing::info!(release_id = release.id, version = %release.version, "release deleted");
			print_json(stdout, &release)
		}
		QueryCommand::ProductFiles => print_json(stdout, &client.list_product_files(slug).await?),
		QueryCommand::UserGroups { release_id } => {
			print_json(stdout, &client.list_user_groups(slug, *release_id).await?)
		}
	}
}

/// Writes `value` as one chunk so the sanitizer sees whole values
fn print_json<T: Serialize>(stdout: &mut Sanitizer<io::Stdout>, value: &T) -> anyhow::Result<()> {
	let text = serde_json::to_string_pretty(value)?;
	stdout.write_all(format!("{}\n", text).as_bytes())?;
	stdout.flush()?;
	Ok(())
}
