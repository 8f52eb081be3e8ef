//! Identity Provider Config

use clap::Args;

/// Identity provider settings for bearer session verification.
#[derive(Debug, Args)]
pub struct IdentityProviderConfig {
    /// Identity provider address
    #[arg(long = "identity-addr", env = "IDENTITY_ADDR")]
    pub addr: String,

    /// Identity provider service API key
    #[arg(long = "identity-api-key", env = "IDENTITY_API_KEY", hide_env_values = true)]
    pub api_key: String,
}
