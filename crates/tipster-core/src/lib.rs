//! Core types, repository traits and coordinators for Tipster, a place to
//! post and discuss sport predictions.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement the traits in [`store`]; image hosts implement
//! [`asset::AssetStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod asset;
pub mod comment;
pub mod deletion;
pub mod error;
pub mod feed;
pub mod likes;
pub mod post;
pub mod publish;
pub mod store;
pub mod user;
pub mod view;

pub use error::{Error, ErrorKind, Result};
