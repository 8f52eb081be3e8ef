//! Wallet topups through the payment gateway, credited by webhook.

pub mod checkout;
pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use checkout::{CheckoutClient, CheckoutConfig, MockPaymentGateway, PaymentGateway};
pub use errors::WalletServiceError;
pub use service::{MockWalletService, PgWalletService, WalletService};
