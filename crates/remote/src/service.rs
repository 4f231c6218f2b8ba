// crates/remote/src/service.rs
//! Love-service contract and wire DTOs

use crate::error::{RemoteError, RemoteResult};
use lovedlist_core::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Server response to a toggle request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Whether the server applied the toggle
    pub success: bool,
    /// Authoritative membership after the server processed the request
    pub is_loved: bool,
    /// Authoritative total love count for the listing
    pub love_count: u64,
}

/// One loved listing in the full-list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LovedItem {
    pub item_id: ItemId,
}

/// Server response listing every loved item for the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchAllResponse {
    pub success: bool,
    #[serde(default)]
    pub loved_items: Vec<LovedItem>,
}

/// Server response mapping queried IDs to authoritative membership
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckManyResponse {
    pub success: bool,
    #[serde(default)]
    pub status: HashMap<ItemId, bool>,
}

/// The remote authority for loved listings.
///
/// All methods return `Err` for transport, auth, and HTTP-level rejection;
/// an `Ok` response still carries the server's own `success` flag, which
/// the caller checks before trusting the payload.
pub trait RemoteLoveService {
    /// Flips loved-state for one listing and returns the authoritative result
    fn toggle(&self, item_id: &ItemId) -> impl std::future::Future<Output = RemoteResult<ToggleResponse>> + Send;

    /// Fetches the complete loved-item list for the current user
    fn fetch_all(&self) -> impl std::future::Future<Output = RemoteResult<FetchAllResponse>> + Send;

    /// Queries authoritative membership for a batch of listings
    fn check_many(
        &self,
        item_ids: &[ItemId],
    ) -> impl std::future::Future<Output = RemoteResult<CheckManyResponse>> + Send;
}

/// Supplies the bearer token attached to every backend call
pub trait TokenProvider: Send + Sync {
    /// Returns a currently valid access token
    fn access_token(&self) -> RemoteResult<String>;
}

/// Token provider holding a fixed token, for tests and short-lived sessions
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    /// Provider that always yields the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Provider with no token; every call fails as unauthenticated
    pub fn signed_out() -> Self {
        Self { token: None }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn access_token(&self) -> RemoteResult<String> {
        self.token
            .clone()
            .ok_or_else(|| RemoteError::TokenUnavailable("no signed-in user".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_response_wire_format() {
        let json = r#"{"success":true,"isLoved":true,"loveCount":5}"#;
        let resp: ToggleResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert!(resp.is_loved);
        assert_eq!(resp.love_count, 5);
    }

    #[test]
    fn test_fetch_all_wire_format() {
        let json = r#"{"success":true,"lovedItems":[{"itemId":"p1"},{"itemId":"p2"}]}"#;
        let resp: FetchAllResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.loved_items.len(), 2);
        assert_eq!(resp.loved_items[0].item_id, ItemId::new("p1"));
    }

    #[test]
    fn test_fetch_all_missing_items_defaults_empty() {
        let json = r#"{"success":true}"#;
        let resp: FetchAllResponse = serde_json::from_str(json).unwrap();
        assert!(resp.loved_items.is_empty());
    }

    #[test]
    fn test_check_many_wire_format() {
        let json = r#"{"success":true,"status":{"a":true,"b":false}}"#;
        let resp: CheckManyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status.get(&ItemId::new("a")), Some(&true));
        assert_eq!(resp.status.get(&ItemId::new("b")), Some(&false));
    }

    #[test]
    fn test_static_token_provider() {
        let provider = StaticTokenProvider::new("tok-123");
        assert_eq!(provider.access_token().unwrap(), "tok-123");
    }

    #[test]
    fn test_signed_out_provider_fails() {
        let provider = StaticTokenProvider::signed_out();
        assert!(provider.access_token().unwrap_err().is_auth_failure());
    }
}
