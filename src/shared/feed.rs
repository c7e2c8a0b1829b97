//! Append-only listing of backend records, fetched one page at a time.
//!
//! Filtering works on the records already loaded and never triggers a fetch,
//! so a filter cannot surface records beyond the loaded window.

use serde::de::DeserializeOwned;

use crate::modules::backend::{decode_page, BackendError, PageRequest, RecordStore};

/// Equality match on one field with an implicit wildcard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldMatch {
    #[default]
    All,
    Exactly(String),
}

impl FieldMatch {
    /// Parse a query value where absent, empty and `"all"` mean any value
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => FieldMatch::All,
            Some(v) if v.eq_ignore_ascii_case("all") => FieldMatch::All,
            Some(v) => FieldMatch::Exactly(v.to_string()),
        }
    }

    pub fn accepts(&self, value: Option<&str>) -> bool {
        match self {
            FieldMatch::All => true,
            FieldMatch::Exactly(expected) => value == Some(expected.as_str()),
        }
    }
}

/// Predicate applied to already-loaded feed items
pub trait FeedFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

pub struct PagedFeed<T> {
    collection: &'static str,
    page_size: u32,
    items: Vec<T>,
    has_next: bool,
    next_skip: u32,
    loaded_pages: u32,
}

impl<T: DeserializeOwned> PagedFeed<T> {
    pub fn new(collection: &'static str, page_size: u32) -> Self {
        Self {
            collection,
            page_size,
            items: Vec::new(),
            has_next: false,
            next_skip: 0,
            loaded_pages: 0,
        }
    }

    /// Replace the feed with the first page
    pub async fn load_first(&mut self, store: &dyn RecordStore) -> Result<(), BackendError> {
        self.items.clear();
        self.next_skip = 0;
        self.loaded_pages = 0;
        self.fetch(store).await
    }

    /// Append the next page. No-op once the backend reports no more pages.
    pub async fn load_more(&mut self, store: &dyn RecordStore) -> Result<(), BackendError> {
        if !self.has_next {
            return Ok(());
        }
        self.fetch(store).await
    }

    /// Load the first page and then up to `pages - 1` more
    pub async fn load_pages(
        &mut self,
        store: &dyn RecordStore,
        pages: u32,
    ) -> Result<(), BackendError> {
        self.load_first(store).await?;
        while self.loaded_pages < pages && self.has_next {
            self.load_more(store).await?;
        }
        Ok(())
    }

    async fn fetch(&mut self, store: &dyn RecordStore) -> Result<(), BackendError> {
        let request = PageRequest {
            limit: self.page_size,
            skip: self.next_skip,
        };
        let raw = store.get_all(self.collection, &[], request).await?;
        let page = decode_page::<T>(self.collection, raw);

        self.items.extend(page.items);
        self.has_next = page.has_next;
        // The backend may omit the cursor on the last page
        self.next_skip = page.next_skip.unwrap_or(0);
        self.loaded_pages += 1;
        Ok(())
    }
}

impl<T> PagedFeed<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn next_skip(&self) -> u32 {
        self.next_skip
    }

    pub fn loaded_pages(&self) -> u32 {
        self.loaded_pages
    }

    /// Loaded items accepted by `filter`, in feed order
    pub fn filtered<'a, F: FeedFilter<T>>(&'a self, filter: &F) -> Vec<&'a T> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }
}
