//! Share links
//!
//! A saved snippet is reachable at `{origin}/?share={id}`; opening such a
//! link loads the snippet once at startup.

use reqwest::Url;

use crate::error::{ApiError, ApiResult};

/// Query parameter carrying the share id
pub const SHARE_QUERY_PARAM: &str = "share";

/// Builds the public link for a share id
///
/// # Errors
///
/// Returns [`ApiError::InvalidUrl`] if `origin` is not an absolute URL.
pub fn share_url(origin: &str, share_id: &str) -> ApiResult<Url> {
    let mut url = Url::parse(origin).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
    url.set_path("/");
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(SHARE_QUERY_PARAM, share_id);
    Ok(url)
}

/// Reads the share id from a page URL, ignoring empty values
#[must_use]
pub fn share_id_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Accepts either a bare share id or a full share link
#[must_use]
pub fn parse_share_reference(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match Url::parse(input) {
        Ok(url) if !url.cannot_be_a_base() => share_id_from_url(&url),
        _ => Some(input.to_string()),
    }
}
