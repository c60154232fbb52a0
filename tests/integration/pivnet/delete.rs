use mockall::predicate;
use mockito::Server;
use reqwest::Method;

use pivnet_resource::{
	models::ClientConfig,
	services::pivnet::{ApiRequest, ApiResponse, PivnetClient, PivnetError},
};

use crate::integration::mocks::{releases_body, MockTransport};

const SLUG: &str = "pivnet-resource-test";

#[tokio::test]
async fn test_delete_is_keyed_by_resolved_id() {
	let versions: Vec<String> = (1..=20).map(|i| format!("0.{}.0", i)).collect();
	let listing: Vec<(u64, &str)> = versions
		.iter()
		.enumerate()
		.map(|(i, version)| (1000 + i as u64, version.as_str()))
		.collect();
	let body = releases_body(&listing);

	let mut transport = MockTransport::new();
	transport
		.expect_send()
		.with(predicate::eq(ApiRequest::get(
			"/products/pivnet-resource-test/releases",
		)))
		.times(1)
		.returning(move |_| Ok(ApiResponse::new(200, body.clone())));
	transport
		.expect_send()
		.with(predicate::function(|request: &ApiRequest| {
			request.method == Method::DELETE
		}))
		.times(1)
		.returning(|request| {
			assert_eq!(request.path, "/products/pivnet-resource-test/releases/1019");
			Ok(ApiResponse::new(204, Vec::new()))
		});

	let client = PivnetClient::with_transport(transport);
	let deleted = client.delete_release(SLUG, "0.20.0").await.unwrap();

	assert_eq!(deleted.id, 1019);
	assert_eq!(deleted.version, "0.20.0");
}

#[tokio::test]
async fn test_delete_of_unknown_version_sends_no_delete() {
	let body = releases_body(&[(1, "1.0.0")]);

	let mut transport = MockTransport::new();
	transport
		.expect_send()
		.withf(|request: &ApiRequest| request.method == Method::GET)
		.times(1)
		.returning(move |_| Ok(ApiResponse::new(200, body.clone())));
	transport
		.expect_send()
		.withf(|request: &ApiRequest| request.method == Method::DELETE)
		.never();

	let client = PivnetClient::with_transport(transport);
	let err = client.delete_release(SLUG, "2.0.0").await.unwrap_err();

	assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_without_no_content_fails() {
	let body = releases_body(&[(3, "1.0.0")]);

	let mut transport = MockTransport::new();
	transport
		.expect_send()
		.withf(|request: &ApiRequest| request.method == Method::GET)
		.returning(move |_| Ok(ApiResponse::new(200, body.clone())));
	transport
		.expect_send()
		.withf(|request: &ApiRequest| request.method == Method::DELETE)
		.returning(|_| Ok(ApiResponse::new(200, b"{}".to_vec())));

	let client = PivnetClient::with_transport(transport);
	let err = client.delete_release(SLUG, "1.0.0").await.unwrap_err();

	assert!(matches!(
		err,
		PivnetError::UnexpectedStatus { status: 200, .. }
	));
}

#[tokio::test]
async fn test_delete_transport_failure_is_propagated() {
	let body = releases_body(&[(3, "1.0.0")]);

	let mut transport = MockTransport::new();
	transport
		.expect_send()
		.withf(|request: &ApiRequest| request.method == Method::GET)
		.returning(move |_| Ok(ApiResponse::new(200, body.clone())));
	transport
		.expect_send()
		.withf(|request: &ApiRequest| request.method == Method::DELETE)
		.returning(|_| Err(PivnetError::transport_error("connection reset")));

	let client = PivnetClient::with_transport(transport);
	let err = client.delete_release(SLUG, "1.0.0").await.unwrap_err();

	assert!(matches!(err, PivnetError::TransportError(_)));
}

#[tokio::test]
async fn test_fixture_lifecycle_against_server() {
	let mut server = Server::new_async().await;
	let listing = server
		.mock("GET", "/api/v2/products/pivnet-resource-test/releases")
		.with_status(200)
		.with_body(releases_body(&[(1, "v1"), (2, "v2")]))
		.create_async()
		.await;
	let delete = server
		.mock("DELETE", "/api/v2/products/pivnet-resource-test/releases/2")
		.match_header("authorization", "Token some-api-token")
		.with_status(204)
		.expect(1)
		.create_async()
		.await;

	let config = ClientConfig::new(server.url(), "some-api-token");
	let client = PivnetClient::new(&config).unwrap();

	let found = client.find_release_by_version(SLUG, "v2").await.unwrap();
	assert_eq!(found.id, 2);

	let deleted = client.delete_release(SLUG, "v2").await.unwrap();
	assert_eq!(deleted.id, 2);
	delete.assert_async().await;

	// the service no longer lists the deleted release
	listing.remove_async().await;
	let _listing = server
		.mock("GET", "/api/v2/products/pivnet-resource-test/releases")
		.with_status(200)
		.with_body(releases_body(&[(1, "v1")]))
		.create_async()
		.await;

	assert_eq!(client.list_product_versions(SLUG).await.unwrap(), vec!["v1"]);
	let err = client.delete_release(SLUG, "v2").await.unwrap_err();
	assert!(err.is_not_found());
	delete.assert_async().await;
}
