//! Example: Create a payment and query its status.
//!
//! Reads `GLOBITEX_TOOL_*` configuration plus the payment details from the
//! environment (or a `.env` file).
//!
//! Run with: cargo run --example create_payment

use globitex_api_client::rest::{EurowalletClient, NewPayment, PaymentStatusRequest};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("environment variable {name} not set").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = EurowalletClient::from_env_with_prefix("GLOBITEX_TOOL")?;

    let amount: Decimal = env("GLOBITEX_TOOL_AMOUNT")?.parse()?;
    let payment = NewPayment::new(
        env("GLOBITEX_TOOL_SRC_ACCOUNT")?,
        amount,
        "Some beneficiary name",
        env("GLOBITEX_TOOL_DST_ACCOUNT")?,
        "Some reference text",
    );

    let receipt = client.create_new_payment(&payment).await?;
    println!("Created payment {} ({})", receipt.payment_id, receipt.status);

    let status = client
        .get_payment_status_for(&PaymentStatusRequest::new(receipt.payment_id))
        .await?;
    println!("Payment status: {}", status.body);

    Ok(())
}
