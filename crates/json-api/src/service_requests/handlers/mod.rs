//! Service Request Handlers

pub(crate) mod create;
pub(crate) mod update;
