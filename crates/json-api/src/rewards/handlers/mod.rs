//! Reward Handlers

pub(crate) mod index;
pub(crate) mod redeem;
