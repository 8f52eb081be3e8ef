//! Payment Gateway Config

use clap::Args;

/// Payment gateway settings for wallet topup checkout sessions.
#[derive(Debug, Args)]
pub struct PaymentGatewayConfig {
    /// Payment gateway address
    #[arg(long = "payment-gateway-addr", env = "PAYMENT_GATEWAY_ADDR")]
    pub addr: String,

    /// Payment gateway secret API key
    #[arg(
        long = "payment-gateway-api-key",
        env = "PAYMENT_GATEWAY_API_KEY",
        hide_env_values = true
    )]
    pub api_key: String,
}
