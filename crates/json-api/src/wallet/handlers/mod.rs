//! Wallet Handlers

pub(crate) mod topup;
pub(crate) mod webhook;
