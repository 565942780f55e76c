use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Editorial, Journalist, Multimedia, Photo, Section, Tag, Widget};
use crate::error::Result;

// Entity clients: one entity by id, or `EditorialError::NotFound`.

#[async_trait]
pub trait EditorialPort: Send + Sync {
    async fn find_editorial_by_id(&self, id: &str) -> Result<Editorial>;
}

#[async_trait]
pub trait SectionPort: Send + Sync {
    async fn find_section_by_id(&self, id: &str) -> Result<Section>;
}

#[async_trait]
pub trait JournalistPort: Send + Sync {
    async fn find_journalist_by_alias(&self, alias_id: &str) -> Result<Journalist>;
}

#[async_trait]
pub trait TagPort: Send + Sync {
    async fn find_tag_by_id(&self, id: &str) -> Result<Tag>;
}

#[async_trait]
pub trait MultimediaPort: Send + Sync {
    async fn find_multimedia_by_id(&self, id: &str) -> Result<Multimedia>;
    async fn find_photo_by_id(&self, id: &str) -> Result<Photo>;
    async fn find_widget_by_id(&self, id: &str) -> Result<Widget>;
}

/// Batched rewrite of membership urls; returns original url -> rewritten url.
#[async_trait]
pub trait MembershipPort: Send + Sync {
    async fn rewrite_membership_links(
        &self,
        editorial_id: &str,
        urls: &[String],
        site_encoding: &str,
    ) -> Result<HashMap<String, String>>;
}

#[async_trait]
pub trait LegacyPort: Send + Sync {
    /// Raw legacy document, returned to the caller untouched.
    async fn find_legacy_editorial_by_id(&self, id: &str) -> Result<serde_json::Value>;
    async fn find_comments_count_by_editorial_id(&self, id: &str) -> Result<u64>;
}

/// Every collaborator the aggregator talks to.
#[derive(Clone)]
pub struct Backends {
    pub editorials: Arc<dyn EditorialPort>,
    pub sections: Arc<dyn SectionPort>,
    pub journalists: Arc<dyn JournalistPort>,
    pub tags: Arc<dyn TagPort>,
    pub multimedia: Arc<dyn MultimediaPort>,
    pub membership: Arc<dyn MembershipPort>,
    pub legacy: Arc<dyn LegacyPort>,
}
