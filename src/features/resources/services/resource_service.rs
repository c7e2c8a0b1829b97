use std::sync::Arc;

use crate::core::error::Result;
use crate::features::resources::dtos::{ResourceFeedDto, ResourceListQuery};
use crate::features::resources::models::EducationalResource;
use crate::modules::backend::RecordStore;
use crate::shared::constants::{FEED_PAGE_SIZE, MAX_FEED_PAGES, RESOURCES_COLLECTION};
use crate::shared::feed::{FeedFilter, FieldMatch, PagedFeed};

struct ResourceFilter {
    category: FieldMatch,
    waste_type: FieldMatch,
}

impl FeedFilter<EducationalResource> for ResourceFilter {
    fn matches(&self, resource: &EducationalResource) -> bool {
        self.category.accepts(resource.category.as_deref())
            && self.waste_type.accepts(resource.waste_type.as_deref())
    }
}

/// Service for educational resources
pub struct ResourceService {
    store: Arc<dyn RecordStore>,
}

impl ResourceService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ResourceListQuery) -> Result<ResourceFeedDto> {
        let pages = query.pages.unwrap_or(1).clamp(1, MAX_FEED_PAGES);
        let filter = ResourceFilter {
            category: FieldMatch::from_query(query.category.as_deref()),
            waste_type: FieldMatch::from_query(query.waste_type.as_deref()),
        };

        let mut feed = PagedFeed::<EducationalResource>::new(RESOURCES_COLLECTION, FEED_PAGE_SIZE);
        feed.load_pages(self.store.as_ref(), pages).await?;

        Ok(ResourceFeedDto {
            items: feed.filtered(&filter).into_iter().cloned().collect(),
            has_next: feed.has_next(),
            next_skip: feed.next_skip(),
            loaded_count: feed.items().len(),
            loaded_pages: feed.loaded_pages(),
        })
    }
}
