//! Prefix listing over an [`ObjectStore`].
//!
//! [`ListingPages`] follows continuation tokens and yields raw pages; it knows
//! nothing about filtering. [`json_key_suffixes`] layers the `json` filter and
//! suffix extraction on top, and is what card and answer traversal share.

use tracing::{debug, warn};

use crate::error::{QSetError, Result};
use crate::storage_keys::{is_json_key, key_suffix};
use crate::store::{ListPage, ObjectStore, StoreError};

/// Lazy sequence of listing pages under one prefix.
///
/// Ends after a page with no continuation token, after the first error, or
/// when the store hands back the token it was just given.
pub struct ListingPages<'a> {
    store: &'a dyn ObjectStore,
    prefix: String,
    continuation_token: Option<String>,
    finished: bool,
}

impl<'a> ListingPages<'a> {
    pub fn new(store: &'a dyn ObjectStore, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            continuation_token: None,
            finished: false,
        }
    }
}

impl Iterator for ListingPages<'_> {
    type Item = std::result::Result<ListPage, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let page = match self
            .store
            .list_page(&self.prefix, self.continuation_token.as_deref())
        {
            Ok(page) => page,
            Err(error) => {
                self.finished = true;
                return Some(Err(error));
            }
        };

        debug!(
            prefix = %self.prefix,
            keys = page.keys.len(),
            has_more = page.next_continuation_token.is_some(),
            "listed page"
        );

        match page.next_continuation_token.as_deref() {
            None => self.finished = true,
            Some(token) if self.continuation_token.as_deref() == Some(token) => {
                warn!(prefix = %self.prefix, token, "store repeated continuation token");
                self.finished = true;
            }
            Some(token) => self.continuation_token = Some(token.to_string()),
        }

        Some(Ok(page))
    }
}

/// Trailing key segments under `prefix` for keys containing `json`, across all pages.
pub fn json_key_suffixes(
    store: &dyn ObjectStore,
    prefix: String,
) -> impl Iterator<Item = Result<String>> + '_ {
    ListingPages::new(store, prefix).flat_map(|page| match page {
        Ok(page) => page
            .keys
            .into_iter()
            .filter(|key| is_json_key(key))
            .map(|key| Ok(key_suffix(&key).to_string()))
            .collect::<Vec<_>>(),
        Err(error) => vec![Err(QSetError::from(error))],
    })
}

/// Keys from a single listing call; fails with [`QSetError::EmptyListing`] when none.
pub fn list_unpaged(store: &dyn ObjectStore, prefix: &str) -> Result<Vec<String>> {
    let page = store.list_page(prefix, None)?;
    if page.next_continuation_token.is_some() {
        warn!(
            prefix,
            returned = page.keys.len(),
            "unpaged listing truncated, ignoring remaining pages"
        );
    }
    if page.keys.is_empty() {
        return Err(QSetError::EmptyListing {
            prefix: prefix.to_string(),
        });
    }
    Ok(page.keys)
}
