mod commands;
mod worker;

pub(crate) use commands::{RequestCommand, RequestResponse};
pub(crate) use worker::spawn;
