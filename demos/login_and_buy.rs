//! Minimal walkthrough: authenticate, browse the catalog, and place a sandbox order.

// crates.io
use color_eyre::Result;
// self
use reseller_sdk::{
	api::{BuyOutcome, ResellerClient},
	endpoint::ApiDescriptor,
	params::Params,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor =
		ApiDescriptor::builder(Url::parse("https://api.example-vendor.com/api/v1/")?).build()?;
	let client = ResellerClient::new(descriptor)?;
	let Some(session) = client.auth("reseller@example.com", "password").await? else {
		println!("authentication failed");

		return Ok(());
	};

	println!("authenticated; callback secret held: {}", session.callback_secret.is_some());

	if let Some(offers) = client.offers(Params::new().set("category_id", 3)).await? {
		println!("offers: {offers}");
	}

	let outcome = client
		.buy("offer", Params::new().set("quantity", 20).set("offer_id", 142).set("sandbox", 1))
		.await?;

	match outcome {
		BuyOutcome::Placed(order) => println!("order placed: {order}"),
		BuyOutcome::Rejected(errors) => println!("order rejected: {errors:?}"),
		BuyOutcome::NoData => println!("the order endpoint returned nothing"),
		BuyOutcome::UnknownKind => println!("unknown order kind"),
	}

	Ok(())
}
