#![cfg(unix)]

use std::{
	fs,
	os::unix::fs::PermissionsExt,
	path::Path,
	sync::{Arc, Mutex},
};

use tempfile::TempDir;

use pivnet_resource::{
	models::{
		metadata_value_for_key, CheckRequest, CheckResponse, InParams, InRequest, InResponse,
		OutParams, OutRequest, OutResponse, Source, Version,
	},
	services::{
		resource::{ResourceError, ResourceExecutables, ResourceRunner, S3_OUT_NAME},
		sanitizer::{Sanitizer, SecretMapping},
	},
};

const TOKEN: &str = "harness-api-token";
const SECRET_KEY: &str = "harness-secret-access-key";

fn write_script(dir: &Path, name: &str, body: &str) {
	let path = dir.join(name);
	fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
	fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn resource_dir() -> TempDir {
	let dir = TempDir::new().unwrap();
	write_script(
		dir.path(),
		"check",
		r#"cat > /dev/null
echo '[{"product_version":"1.0.0"},{"product_version":"1.1.0"}]'"#,
	);
	write_script(
		dir.path(),
		"in",
		r#"cat > /dev/null
echo "fetching with token harness-api-token" >&2
echo '{"version":{"product_version":"1.1.0"},"metadata":[{"name":"version","value":"1.1.0"},{"name":"release_type","value":"Minor Release"}]}'"#,
	);
	write_script(
		dir.path(),
		"out",
		r#"cat > /dev/null
"$(dirname "$0")/s3-out" >&2
echo '{"version":{"product_version":"2.0.0"},"metadata":[]}'"#,
	);
	dir
}

fn source() -> Source {
	Source {
		api_token: TOKEN.to_string(),
		product_slug: "pivnet-resource-test".to_string(),
		secret_access_key: SECRET_KEY.to_string(),
		..Source::default()
	}
}

fn runner() -> (ResourceRunner<Vec<u8>>, Arc<Mutex<Vec<u8>>>) {
	let sink = Arc::new(Mutex::new(Vec::new()));
	let mapping = SecretMapping::new([
		(TOKEN, "***sanitized-api-token***"),
		(SECRET_KEY, "***sanitized-aws-secret-access-key***"),
	]);
	(
		ResourceRunner::new(Sanitizer::new(mapping, Arc::clone(&sink))),
		sink,
	)
}

fn output(sink: &Arc<Mutex<Vec<u8>>>) -> String {
	String::from_utf8(sink.lock().unwrap().clone()).unwrap()
}

#[tokio::test]
async fn test_check_returns_versions() {
	let dir = resource_dir();
	let executables = ResourceExecutables::locate(dir.path()).unwrap();
	let (runner, sink) = runner();

	let request = CheckRequest {
		source: source(),
		version: Some(Version::new("1.0.0")),
	};
	let session = runner
		.run_json(&executables.check_path, &[], &request)
		.await
		.unwrap();

	assert!(session.success());
	let versions: CheckResponse = session.parse_stdout().unwrap();
	assert_eq!(versions, vec![Version::new("1.0.0"), Version::new("1.1.0")]);

	let log = output(&sink);
	assert!(log.starts_with("input: "));
	assert!(log.contains("***sanitized-api-token***"));
	assert!(log.contains("***sanitized-aws-secret-access-key***"));
	assert!(!log.contains(TOKEN));
	assert!(!log.contains(SECRET_KEY));
}

#[tokio::test]
async fn test_in_reports_metadata_and_sanitizes_stderr() {
	let dir = resource_dir();
	let executables = ResourceExecutables::locate(dir.path()).unwrap();
	let (runner, sink) = runner();
	let destination = TempDir::new().unwrap();

	let request = InRequest {
		source: source(),
		version: Version::new("1.1.0"),
		params: InParams::default(),
	};
	let args = vec![destination.path().display().to_string()];
	let session = runner
		.run_json(&executables.in_path, &args, &request)
		.await
		.unwrap();

	let response: InResponse = session.parse_stdout().unwrap();
	assert_eq!(response.version, Version::new("1.1.0"));
	assert_eq!(
		metadata_value_for_key(&response.metadata, "release_type").unwrap(),
		"Minor Release"
	);
	assert!(matches!(
		metadata_value_for_key(&response.metadata, "eula_slug"),
		Err(ResourceError::MetadataNotFound(_))
	));

	// the session keeps the raw stream; only the mirrored output is redacted
	assert!(session.stderr_text().contains(TOKEN));
	let log = output(&sink);
	assert!(log.contains("fetching with token ***sanitized-api-token***"));
	assert!(!log.contains(TOKEN));
}

#[tokio::test]
async fn test_out_uses_installed_s3_out() {
	let dir = resource_dir();
	let executables = ResourceExecutables::locate(dir.path()).unwrap();

	let helpers = TempDir::new().unwrap();
	write_script(helpers.path(), "s3-out-build", "echo uploaded-by-s3-out");
	let installed = executables
		.install_s3_out(&helpers.path().join("s3-out-build"))
		.unwrap();
	assert_eq!(installed, dir.path().join(S3_OUT_NAME));

	let (runner, sink) = runner();
	let request = OutRequest {
		source: source(),
		params: OutParams {
			file_glob: Some("*.tgz".to_string()),
			s3_filepath_prefix: Some("product-files/pivnet-resource-test".to_string()),
			version_file: Some("version".to_string()),
			..OutParams::default()
		},
	};
	let args = vec![dir.path().display().to_string()];
	let session = runner
		.run_json(&executables.out_path, &args, &request)
		.await
		.unwrap();

	assert!(session.success(), "out failed: {}", session.stderr_text());
	let response: OutResponse = session.parse_stdout().unwrap();
	assert_eq!(response.version, Version::new("2.0.0"));
	assert!(output(&sink).contains("uploaded-by-s3-out"));
}

#[tokio::test]
async fn test_non_json_stdout_is_decode_error() {
	let dir = TempDir::new().unwrap();
	write_script(dir.path(), "check", "echo not json");
	let (runner, _) = runner();

	let session = runner
		.run(&dir.path().join("check"), &[], b"{}")
		.await
		.unwrap();
	let err = session.parse_stdout::<CheckResponse>().unwrap_err();
	assert!(matches!(err, ResourceError::DecodeError(_)));
}
