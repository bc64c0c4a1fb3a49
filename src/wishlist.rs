use indexmap::IndexMap;
use json::JsonValue;
use log::debug;

use crate::error::{TransportError, WishlistError};
use crate::game::RawEntry;
use crate::http::Transport;

pub const DEFAULT_WISHLIST_URL: &str = "https://store.steampowered.com/wishlist/profiles";

/// Upper bound on page requests, roughly 4,500 games at ~90 per page.
pub const MAX_PAGES: u32 = 50;

/// What a single `wishlistdata` page turned out to be.
#[derive(Debug, PartialEq)]
pub enum WishlistPage {
    Entries(IndexMap<String, RawEntry>),
    /// `{"success": n}` and nothing else.
    PrivateMarker,
    Empty,
}

impl WishlistPage {
    pub fn decode(value: &JsonValue) -> Result<Self, TransportError> {
        match value {
            JsonValue::Object(obj) if obj.len() == 1 && value.has_key("success") => {
                Ok(Self::PrivateMarker)
            }
            JsonValue::Object(obj) if obj.is_empty() => Ok(Self::Empty),
            JsonValue::Object(_) => Ok(Self::Entries(
                value
                    .entries()
                    .map(|(app_id, entry)| (app_id.to_string(), RawEntry::from_json(entry)))
                    .collect(),
            )),
            JsonValue::Array(items) if items.is_empty() => Ok(Self::Empty),
            other => Err(TransportError::UnexpectedShape(format!(
                "expected wishlist object, got {}",
                other.dump()
            ))),
        }
    }
}

pub struct WishlistFetcher<'a, T: Transport> {
    transport: &'a T,
    base_url: &'a str,
}

impl<'a, T: Transport> WishlistFetcher<'a, T> {
    pub fn new(transport: &'a T, base_url: &'a str) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// Requests pages until one comes back empty or `MAX_PAGES` is reached.
    pub fn fetch(&self, user_id: &str) -> Result<IndexMap<String, RawEntry>, WishlistError> {
        if user_id.is_empty() || !user_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WishlistError::InvalidInput(user_id.to_string()));
        }

        let url = format!("{}/{user_id}/wishlistdata", self.base_url.trim_end_matches('/'));
        let mut wishlist = IndexMap::new();

        for page in 0..MAX_PAGES {
            let response = self
                .transport
                .get_json(&url, &[("p", page.to_string())])
                .and_then(|body| WishlistPage::decode(&body))
                .map_err(|source| WishlistError::Fetch { page, source })?;

            match response {
                WishlistPage::PrivateMarker => return Err(WishlistError::PrivateProfile),
                WishlistPage::Empty => {
                    debug!("wishlist for {user_id} ended after {page} page(s)");
                    return Ok(wishlist);
                }
                WishlistPage::Entries(entries) => {
                    debug!("page {page} of {user_id}'s wishlist: {} entries", entries.len());
                    wishlist.extend(entries);
                }
            }
        }

        debug!("stopped at the {MAX_PAGES} page limit for {user_id}");
        Ok(wishlist)
    }
}
