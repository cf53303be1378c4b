//! Checkout Example
//!
//! Creates a MULTICAIXA Express payment, queries it, and shows how a
//! notification handler would verify the callback parameters.
//!
//! ```bash
//! export PAYPAY_PARTNER_ID=200001
//! export PAYPAY_PRIVATE_KEY_PATH=merchant_private.pem
//! export PAYPAY_PUBLIC_KEY_PATH=paypay_public.pem
//! export PAYPAY_BASE_URL=https://sandbox.example/recv.do   # optional
//! cargo run -p paypay-sdk --example checkout
//! ```

use paypay_sdk::clock::{generate_request_no, SystemClock};
use paypay_sdk::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PayPayConfig::from_env()?;
    println!("Gateway: {}", config.base_url);
    let client = PayPayClient::new(config)?;

    let order_no = generate_request_no("PAY", &SystemClock);
    let payment = PaymentRequest::new(
        order_no.as_str(),
        Amount::parse("1500.00")?,
        "Encomenda online",
    )
    .with_body("2x Camiseta")
    .with_timeout_express("15m")
    .with_notify_url("https://shop.example/paypay/notify");

    let response = client.create_multicaixa_express_payment(&payment).await?;
    if !response.is_success() {
        println!(
            "Payment rejected: {} {} ({})",
            response.code,
            response.msg,
            response.sub_msg.unwrap_or_default()
        );
        return Ok(());
    }
    println!(
        "Payment created: trade_no={:?}",
        response.biz_content.trade_no
    );
    if let Some(qr) = &response.biz_content.qr_code {
        println!("Show this QR code to the payer: {}", qr);
    }

    let status = client
        .query_payment(&QueryRequest::by_out_trade_no(order_no.as_str()))
        .await?;
    println!("Current status: {:?}", status.biz_content.trade_status);

    // A web handler would collect the callback form fields the same way.
    let callback: ParameterSet = [
        ("out_trade_no", order_no.as_str()),
        ("trade_status", "TRADE_SUCCESS"),
        ("sign", "not-a-real-signature"),
    ]
    .into_iter()
    .collect();
    match client.verify_notification(callback) {
        Ok(notification) => println!("Notification: {}", notification.trade_status),
        Err(e) => println!("Rejected forged notification: {}", e),
    }

    Ok(())
}
