//! Background machinery that keeps blocking backend calls off the UI thread.

pub mod download;
pub(crate) mod requests;
