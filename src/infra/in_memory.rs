use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::app::ports::{
    Backends, EditorialPort, JournalistPort, LegacyPort, MembershipPort, MultimediaPort, SectionPort, TagPort,
};
use crate::domain::{Editorial, Journalist, Multimedia, Photo, Section, Tag, Widget};
use crate::error::{EditorialError, Result};

/// Backend call, used to inject failures and count invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Editorial,
    Section,
    Journalist,
    Tag,
    Multimedia,
    Photo,
    Widget,
    Membership,
    Legacy,
    Comments,
}

/// Fixture file layout. Every map is keyed by entity id.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub editorials: HashMap<String, Editorial>,
    pub sections: HashMap<String, Section>,
    /// Looked up by any of their alias ids.
    pub journalists: Vec<Journalist>,
    pub tags: HashMap<String, Tag>,
    pub multimedia: HashMap<String, Multimedia>,
    pub photos: HashMap<String, Photo>,
    pub widgets: HashMap<String, Widget>,
    pub legacy: HashMap<String, serde_json::Value>,
    pub comments: HashMap<String, u64>,
    /// Original url -> rewritten url.
    pub membership: HashMap<String, String>,
}

/// In-memory implementation of every port, for local runs and tests.
#[derive(Default)]
pub struct InMemoryBackend {
    fixtures: Mutex<Fixtures>,
    failures: Mutex<HashSet<(Call, String)>>,
    calls: Mutex<HashMap<Call, usize>>,
    membership_batches: Mutex<Vec<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryBackend {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            fixtures: Mutex::new(fixtures),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let backend = Self::from_json(&content)?;
        debug!(
            "Loaded fixtures from {} ({} editorials)",
            path.as_ref().display(),
            lock(&backend.fixtures).editorials.len()
        );
        Ok(backend)
    }

    /// Every port served by one shared backend.
    pub fn backends(self: &Arc<Self>) -> Backends {
        Backends {
            editorials: self.clone(),
            sections: self.clone(),
            journalists: self.clone(),
            tags: self.clone(),
            multimedia: self.clone(),
            membership: self.clone(),
            legacy: self.clone(),
        }
    }

    /// Make `call` fail with a 503 for `id`. Membership calls are keyed by editorial id.
    pub fn fail(&self, call: Call, id: impl Into<String>) {
        lock(&self.failures).insert((call, id.into()));
    }

    pub fn calls(&self, call: Call) -> usize {
        lock(&self.calls).get(&call).copied().unwrap_or(0)
    }

    pub fn membership_batches(&self) -> Vec<Vec<String>> {
        lock(&self.membership_batches).clone()
    }

    fn enter(&self, call: Call, id: &str) -> Result<()> {
        *lock(&self.calls).entry(call).or_insert(0) += 1;
        if lock(&self.failures).contains(&(call, id.to_string())) {
            return Err(EditorialError::Api {
                status: 503,
                message: format!("injected failure for {:?} {}", call, id),
            });
        }
        Ok(())
    }

    fn find<T: Clone>(
        &self,
        call: Call,
        entity: &'static str,
        id: &str,
        select: impl FnOnce(&Fixtures) -> Option<&T>,
    ) -> Result<T> {
        self.enter(call, id)?;
        let fixtures = lock(&self.fixtures);
        select(&fixtures)
            .cloned()
            .ok_or_else(|| EditorialError::not_found(entity, id))
    }
}

#[async_trait]
impl EditorialPort for InMemoryBackend {
    async fn find_editorial_by_id(&self, id: &str) -> Result<Editorial> {
        self.find(Call::Editorial, "Editorial", id, |f| f.editorials.get(id))
    }
}

#[async_trait]
impl SectionPort for InMemoryBackend {
    async fn find_section_by_id(&self, id: &str) -> Result<Section> {
        self.find(Call::Section, "Section", id, |f| f.sections.get(id))
    }
}

#[async_trait]
impl JournalistPort for InMemoryBackend {
    async fn find_journalist_by_alias(&self, alias_id: &str) -> Result<Journalist> {
        self.find(Call::Journalist, "Journalist", alias_id, |f| {
            f.journalists.iter().find(|j| j.alias(alias_id).is_some())
        })
    }
}

#[async_trait]
impl TagPort for InMemoryBackend {
    async fn find_tag_by_id(&self, id: &str) -> Result<Tag> {
        self.find(Call::Tag, "Tag", id, |f| f.tags.get(id))
    }
}

#[async_trait]
impl MultimediaPort for InMemoryBackend {
    async fn find_multimedia_by_id(&self, id: &str) -> Result<Multimedia> {
        self.find(Call::Multimedia, "Multimedia", id, |f| f.multimedia.get(id))
    }

    async fn find_photo_by_id(&self, id: &str) -> Result<Photo> {
        self.find(Call::Photo, "Photo", id, |f| f.photos.get(id))
    }

    async fn find_widget_by_id(&self, id: &str) -> Result<Widget> {
        self.find(Call::Widget, "Widget", id, |f| f.widgets.get(id))
    }
}

#[async_trait]
impl MembershipPort for InMemoryBackend {
    async fn rewrite_membership_links(
        &self,
        editorial_id: &str,
        urls: &[String],
        _site_encoding: &str,
    ) -> Result<HashMap<String, String>> {
        self.enter(Call::Membership, editorial_id)?;
        lock(&self.membership_batches).push(urls.to_vec());
        let fixtures = lock(&self.fixtures);
        Ok(urls
            .iter()
            .filter_map(|url| fixtures.membership.get(url).map(|rewritten| (url.clone(), rewritten.clone())))
            .collect())
    }
}

#[async_trait]
impl LegacyPort for InMemoryBackend {
    async fn find_legacy_editorial_by_id(&self, id: &str) -> Result<serde_json::Value> {
        self.find(Call::Legacy, "LegacyEditorial", id, |f| f.legacy.get(id))
    }

    async fn find_comments_count_by_editorial_id(&self, id: &str) -> Result<u64> {
        self.enter(Call::Comments, id)?;
        Ok(lock(&self.fixtures).comments.get(id).copied().unwrap_or(0))
    }
}
