use async_trait::async_trait;
use proptest::{prelude::*, test_runner::Config};

use pivnet_resource::{
	models::Release,
	services::pivnet::{ApiRequest, ApiResponse, PivnetClient, PivnetError, PivnetTransport},
};

use crate::properties::strategies::versions_strategy;

/// Answers every request with the same releases listing
struct FixedListing {
	body: Vec<u8>,
}

impl FixedListing {
	fn new(versions: &[String]) -> Self {
		let releases: Vec<Release> = versions
			.iter()
			.enumerate()
			.map(|(index, version)| Release::new(index as u64 + 1, version.clone()))
			.collect();
		Self {
			body: serde_json::to_vec(&serde_json::json!({ "releases": releases })).unwrap(),
		}
	}
}

#[async_trait]
impl PivnetTransport for FixedListing {
	async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, PivnetError> {
		Ok(ApiResponse::new(200, self.body.clone()))
	}
}

fn runtime() -> tokio::runtime::Runtime {
	tokio::runtime::Builder::new_current_thread()
		.build()
		.unwrap()
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_versions_follow_release_order(versions in versions_strategy()) {
		let client = PivnetClient::with_transport(FixedListing::new(&versions));
		let listed = runtime()
			.block_on(client.list_product_versions("pivnet-resource-test"))
			.unwrap();

		prop_assert_eq!(listed, versions);
	}

	#[test]
	fn test_find_returns_first_match(versions in versions_strategy(), wanted in "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}") {
		let client = PivnetClient::with_transport(FixedListing::new(&versions));
		let result = runtime().block_on(client.find_release_by_version("pivnet-resource-test", &wanted));

		match versions.iter().position(|version| *version == wanted) {
			Some(index) => {
				let release = result.unwrap();
				prop_assert_eq!(release.id, index as u64 + 1);
				prop_assert_eq!(release.version, wanted);
			}
			None => prop_assert!(result.unwrap_err().is_not_found()),
		}
	}
}
