//! In-memory object store for tests.
//!
//! Keys are held in lexical order, listings are cut into pages of a fixed size,
//! and the continuation token is the last key of the previous page.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Mutex;

use crate::store::{ListPage, ObjectStore, StoreError};

#[derive(Debug)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    page_size: usize,
    list_calls: Mutex<usize>,
    listing_failure: Mutex<Option<String>>,
    write_failure: Mutex<Option<String>>,
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::with_page_size(1_000)
    }
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics when `page_size` is zero.
    pub fn with_page_size(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            objects: Mutex::new(BTreeMap::new()),
            page_size,
            list_calls: Mutex::new(0),
            listing_failure: Mutex::new(None),
            write_failure: Mutex::new(None),
        }
    }

    pub fn seed_object(&self, key: &str, body: &[u8]) {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .insert(key.to_string(), body.to_vec());
    }

    pub fn seed_json(&self, key: &str, value: &serde_json::Value) {
        let body = serde_json::to_vec(value).expect("fixture should serialize");
        self.seed_object(key, &body);
    }

    pub fn body(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .cloned()
    }

    pub fn json(&self, key: &str) -> Option<serde_json::Value> {
        self.body(key)
            .map(|body| serde_json::from_slice(&body).expect("stored body should be JSON"))
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .keys()
            .cloned()
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().expect("poisoned mutex")
    }

    /// Makes every subsequent listing call fail as unavailable.
    pub fn fail_listings(&self, message: &str) {
        *self.listing_failure.lock().expect("poisoned mutex") = Some(message.to_string());
    }

    /// Makes every subsequent write fail as unavailable.
    pub fn fail_writes(&self, message: &str) {
        *self.write_failure.lock().expect("poisoned mutex") = Some(message.to_string());
    }
}

impl ObjectStore for MemoryObjectStore {
    fn get_object(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.body(key).ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })
    }

    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), StoreError> {
        if let Some(message) = self.write_failure.lock().expect("poisoned mutex").clone() {
            return Err(StoreError::Unavailable(message));
        }
        self.seed_object(key, body);
        Ok(())
    }

    fn list_page(
        &self,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, StoreError> {
        *self.list_calls.lock().expect("poisoned mutex") += 1;
        if let Some(message) = self.listing_failure.lock().expect("poisoned mutex").clone() {
            return Err(StoreError::Unavailable(message));
        }

        let objects = self.objects.lock().expect("poisoned mutex");
        let lower = match continuation_token {
            Some(token) => Bound::Excluded(token.to_string()),
            None => Bound::Included(prefix.to_string()),
        };
        let mut matching = objects
            .range((lower, Bound::Unbounded))
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix));

        let keys: Vec<String> = matching.by_ref().take(self.page_size).cloned().collect();
        let next_continuation_token = match matching.next() {
            Some(_) => keys.last().cloned(),
            None => None,
        };

        Ok(ListPage {
            keys,
            next_continuation_token,
        })
    }
}
