//! Product extraction from page markup.
//!
//! Product containers and their fields are located through `fd-product*`
//! marker attributes placed by the page builder. The listing page and the
//! product-detail page read attributes with different write semantics; see
//! [`listing`] and [`detail`].

pub mod detail;
pub mod error;
mod info;
pub mod listing;
mod markers;

pub use detail::extract_detail;
pub use error::ExtractError;
pub use listing::{extract_listing, extract_product};
pub use scraper::Html;
pub use url::Url;

/// Parses an optional page base URL used to absolutize image sources.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidBaseUrl`] if `raw` is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<url::Url, ExtractError> {
    url::Url::parse(raw).map_err(|e| ExtractError::InvalidBaseUrl {
        base: raw.to_string(),
        reason: e.to_string(),
    })
}
