//! Shared types for the Giftex API.
//!
//! This crate defines the request/response objects exchanged between the
//! Giftex server and its frontends, plus typed HTTP clients gated behind the
//! `client` cargo feature so downstream crates that only need the types do
//! not pull in `reqwest`.

pub mod headers;
pub mod objects;

#[cfg(feature = "client")]
pub mod client;
