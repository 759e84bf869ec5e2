#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use reseller_sdk::{
	api::ResellerClient,
	endpoint::ApiDescriptor,
	http::ReqwestTransport,
	params::Params,
	session::{Secret, SessionState},
	url::Url,
};

fn build_client(server: &MockServer) -> ResellerClient<ReqwestTransport> {
	let descriptor =
		ApiDescriptor::builder(Url::parse(&server.base_url()).expect("Mock base URL should parse."))
			.build()
			.expect("Mock descriptor should build.");

	ResellerClient::new(descriptor).expect("Mock-backed client should build.")
}

#[tokio::test]
async fn offers_send_the_scalar_filters_and_the_bearer() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/offers")
				.query_param("category_id", "3")
				.query_param("discount", "1")
				.header("authorization", "Bearer tok-1");
			then.status(200).json_body(json!([{ "id": 1, "name": "Aged accounts" }]));
		})
		.await;
	let client = build_client(&server)
		.with_session(SessionState::with_credentials(Some(Secret::new("tok-1")), None));
	let offers = client
		.offers(Params::new().set("category_id", 3).set("discount", true))
		.await
		.expect("Offers against the mock should not error.")
		.expect("Offers should return the fixture list.");

	mock.assert_async().await;

	assert_eq!(offers[0]["name"], json!("Aged accounts"));
}

#[tokio::test]
async fn single_offer_is_fetched_by_id() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/offer").query_param("id", "200");
			then.status(200).json_body(json!({ "id": 200, "price": "4.20" }));
		})
		.await;
	let client = build_client(&server);
	let offer = client
		.offer(200)
		.await
		.expect("Offer against the mock should not error.")
		.expect("Offer should return the fixture object.");

	mock.assert_async().await;

	assert_eq!(offer["price"], json!("4.20"));
}

#[tokio::test]
async fn categories_round_trip_the_value_tree() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/categories");
			then.status(200).json_body(json!([{ "id": 1 }, { "id": 2 }]));
		})
		.await;

	let client = build_client(&server);
	let categories = client
		.categories()
		.await
		.expect("Categories against the mock should not error.")
		.expect("Categories should return the fixture list.");

	assert_eq!(categories.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn a_dead_endpoint_yields_no_data_rather_than_an_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/categories");
			then.status(500);
		})
		.await;

	let client = build_client(&server);
	let categories = client.categories().await.expect("Soft failure should not error.");

	assert_eq!(categories, None);
}
