//! Drives check/in/out executables over stdin/stdout.
//!
//! Every run echoes its input payload to the harness output, feeds the
//! payload on stdin, closes stdin and collects stdout, stderr and the exit
//! status. Harness output is a [`Sanitizer`], so payloads and captured
//! streams are scrubbed of credentials before they are shown.

use serde::{de::DeserializeOwned, Serialize};
use std::{
	borrow::Cow,
	io::Write,
	path::{Path, PathBuf},
	process::{ExitStatus, Stdio},
};
use tokio::io::AsyncWriteExt;

use crate::services::{resource::ResourceError, sanitizer::Sanitizer};

/// Result of one executable run
#[derive(Debug)]
pub struct ResourceSession {
	pub executable: PathBuf,
	pub status: ExitStatus,
	pub stdout: Vec<u8>,
	pub stderr: Vec<u8>,
}

impl ResourceSession {
	/// Exit code, or `None` when the process was terminated by a signal
	pub fn exit_code(&self) -> Option<i32> {
		self.status.code()
	}

	pub fn success(&self) -> bool {
		self.status.success()
	}

	pub fn stdout_text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.stdout)
	}

	pub fn stderr_text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.stderr)
	}

	/// Decodes the JSON response the executable wrote to stdout
	pub fn parse_stdout<T: DeserializeOwned>(&self) -> Result<T, ResourceError> {
		Ok(serde_json::from_slice(&self.stdout)?)
	}
}

/// Spawns resource executables with a fixed environment
#[derive(Debug)]
pub struct ResourceRunner<W> {
	output: Sanitizer<W>,
	env: Vec<(String, String)>,
}

impl<W: Write + Send + 'static> ResourceRunner<W> {
	pub fn new(output: Sanitizer<W>) -> Self {
		Self {
			output,
			env: Vec::new(),
		}
	}

	/// Adds an environment variable passed to every spawned executable
	pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.env.push((key.into(), value.into()));
		self
	}

	/// Serializes `request` and runs the executable with it on stdin
	pub async fn run_json<R: Serialize>(
		&self,
		executable: &Path,
		args: &[String],
		request: &R,
	) -> Result<ResourceSession, ResourceError> {
		let payload = serde_json::to_vec(request)?;
		self.run(executable, args, &payload).await
	}

	/// Runs `executable` with `payload` on stdin and waits for it to exit.
	///
	/// The child is killed if this future is dropped or fails before the
	/// child has been reaped, so pipes and process handles never leak.
	pub async fn run(
		&self,
		executable: &Path,
		args: &[String],
		payload: &[u8],
	) -> Result<ResourceSession, ResourceError> {
		let mut output = self.output.clone();
		output.write_all(format!("input: {}\n", String::from_utf8_lossy(payload)).as_bytes())?;

		tracing::info!(executable = %executable.display(), "running resource executable");

		let mut child = tokio::process::Command::new(executable)
			.args(args)
			.envs(self.env.iter().map(|(key, value)| (key.as_str(), value.as_str())))
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true)
			.spawn()
			.map_err(|source| {
				ResourceError::execution_error_with_source("failed to spawn", executable, source)
			})?;

		let stdin = child.stdin.take();
		let feed = async move {
			let Some(mut stdin) = stdin else {
				return Ok(());
			};
			let written = async {
				stdin.write_all(payload).await?;
				stdin.shutdown().await
			};
			match written.await {
				// a child may exit without consuming its input
				Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
				other => other,
			}
		};

		// stdin is fed while stdout/stderr are drained so a chatty child cannot block us
		let (fed, collected) = tokio::join!(feed, child.wait_with_output());

		let collected = collected.map_err(|source| {
			ResourceError::execution_error_with_source("failed to collect output", executable, source)
		})?;

		output.write_all(&collected.stdout)?;
		output.write_all(&collected.stderr)?;
		output.flush()?;

		fed.map_err(|source| {
			ResourceError::execution_error_with_source("failed to write payload", executable, source)
		})?;

		tracing::debug!(
			executable = %executable.display(),
			exit_code = ?collected.status.code(),
			"resource executable finished"
		);

		Ok(ResourceSession {
			executable: executable.to_path_buf(),
			status: collected.status,
			stdout: collected.stdout,
			stderr: collected.stderr,
		})
	}
}
