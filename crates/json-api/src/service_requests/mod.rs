//! Service Requests

mod errors;
mod handlers;

pub(crate) use handlers::*;
