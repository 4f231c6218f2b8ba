// crates/remote/src/lib.rs
//! Remote authority for loved listings
//!
//! The marketplace backend is the single source of truth for which listings
//! a user has loved. This crate defines the [`RemoteLoveService`] contract
//! the sync engine consumes, the wire DTOs, and an HTTP implementation over
//! the REST API. Authentication tokens come from a [`TokenProvider`]
//! consulted before every call; an absent or expired token surfaces as a
//! remote failure, never as a panic.

mod error;
mod http;
mod service;

pub use error::{RemoteError, RemoteResult};
pub use http::{ClientConfig, HttpLoveService};
pub use service::{
    CheckManyResponse, FetchAllResponse, LovedItem, RemoteLoveService, StaticTokenProvider,
    TokenProvider, ToggleResponse,
};
