//! Typed endpoint surface on top of [`crate::ApiClient::request`].

pub mod challenge;
pub mod mascot;
pub mod user;
