use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::app::fan_out::{dedup_ids, degrade, fan_out};
use crate::app::ports::Backends;
use crate::app::resolve_data::{
    EditorialBundle, MediaResource, Placement, ResolveData, ResolvedMultimedia,
};
use crate::app::signature_resolver::SignatureResolver;
use crate::domain::{Body, Editorial, Multimedia, Section};
use crate::error::{EditorialError, Result};
use crate::observability::{AggregatorMetrics, DegradedOperation};
use crate::response::EditorialDocument;
use crate::transform::editorial::{PrimaryEditorial, ResponseAssembler};
use crate::transform::RenderSettings;

/// A referenced editorial plus the multimedia resolved for its thumbnail.
struct ResolvedBundle {
    bundle: EditorialBundle,
    multimedia: Option<ResolvedMultimedia>,
}

/// Outcome of resolving a bundle's thumbnail multimedia.
enum BundleMedia {
    None,
    Resolved(ResolvedMultimedia),
    /// The meta-image fallback failed; the whole bundle is dropped.
    Failed,
}

/// Resolves one editorial id into the merged document, fanning out to every backend.
#[derive(Clone)]
pub struct EditorialAggregator {
    backends: Backends,
    signatures: SignatureResolver,
    assembler: Arc<ResponseAssembler>,
}

impl EditorialAggregator {
    /// Fails when the dispatch registries cannot be built.
    pub fn new(backends: Backends, settings: Arc<RenderSettings>) -> Result<Self> {
        let assembler = Arc::new(ResponseAssembler::new(settings.clone())?);
        let signatures = SignatureResolver::new(backends.journalists.clone(), settings);
        Ok(Self {
            backends,
            signatures,
            assembler,
        })
    }

    #[instrument(skip(self))]
    pub async fn resolve_editorial(&self, id: &str) -> Result<EditorialDocument> {
        let started = Instant::now();
        let result = self.resolve(id).await;
        let outcome = match &result {
            Ok(EditorialDocument::Legacy(_)) => "legacy",
            Ok(EditorialDocument::Resolved(_)) => "resolved",
            Err(_) => "error",
        };
        AggregatorMetrics::record_request(outcome, started.elapsed().as_secs_f64());
        result
    }

    async fn resolve(&self, id: &str) -> Result<EditorialDocument> {
        let editorial = self.backends.editorials.find_editorial_by_id(id).await?;

        if editorial.source_editorial_id.is_none() {
            info!(editorial_id = id, "No source editorial, delegating to legacy service");
            let legacy = self.backends.legacy.find_legacy_editorial_by_id(id).await?;
            return Ok(EditorialDocument::Legacy(legacy));
        }
        if !editorial.is_visible() {
            return Err(EditorialError::NotPublishedYet { id: id.to_string() });
        }

        let section = self
            .backends
            .sections
            .find_section_by_id(&editorial.section_id)
            .await?;
        let membership = self.spawn_membership_links(&editorial, &section);

        let bodies = bodies(&editorial);
        let inserted_ids: Vec<String> = bodies.iter().flat_map(|b| b.inserted_news_ids()).collect();
        let picture_ids: Vec<String> = bodies.iter().flat_map(|b| b.picture_ids()).collect();
        let inserted_ids = dedup_ids(inserted_ids.iter().map(String::as_str));
        let picture_ids = dedup_ids(picture_ids.iter().map(String::as_str));
        let recommended_ids = dedup_ids(editorial.recommended_editorials.iter().map(String::as_str));
        let inline_id = editorial.multimedia.photo_id().map(str::to_string);

        let (inserted, recommended, opening, inline, photos, signatures, tags, count_comments) = tokio::join!(
            self.resolve_bundles(inserted_ids, DegradedOperation::InsertedNews),
            self.resolve_bundles(recommended_ids, DegradedOperation::RecommendedEditorial),
            self.resolve_optional_multimedia(
                editorial.opening_multimedia_id.as_deref(),
                Placement::Opening,
                DegradedOperation::OpeningMultimedia,
            ),
            self.resolve_optional_multimedia(
                inline_id.as_deref(),
                Placement::Inline,
                DegradedOperation::Multimedia,
            ),
            self.resolve_photos(picture_ids),
            self.signatures.resolve_all(
                &editorial.signatures,
                &section,
                editorial.kind.wants_twitter(),
            ),
            self.resolve_tags(&editorial.tags),
            self.resolve_comments_count(id),
        );

        let mut data = ResolveData::new();
        for (bundle_id, resolved) in inserted? {
            store_bundle_multimedia(&mut data, &resolved);
            data.inserted_news_by_id.insert(bundle_id, resolved.bundle);
        }
        for (bundle_id, resolved) in recommended? {
            store_bundle_multimedia(&mut data, &resolved);
            data.recommended_order.push(bundle_id.clone());
            data.recommended_by_id.insert(bundle_id, resolved.bundle);
        }
        if let (Some(opening_id), Some(opening)) = (editorial.opening_multimedia_id.as_ref(), opening?) {
            data.opening_by_id.insert(opening_id.clone(), opening);
        }
        if let (Some(inline_id), Some(inline)) = (inline_id, inline?) {
            data.multimedia_by_id.insert(inline_id, inline);
        }
        data.photo_by_id = photos?.into_iter().collect();
        data.membership_links = match membership {
            Some(handle) => handle.await??.unwrap_or_default(),
            None => HashMap::new(),
        };

        debug!(
            editorial_id = id,
            inserted_news = data.inserted_news_by_id.len(),
            recommended = data.recommended_order.len(),
            photos = data.photo_by_id.len(),
            membership_links = data.membership_links.len(),
            "Resolution context complete"
        );

        let primary = PrimaryEditorial {
            editorial,
            section,
            signatures: signatures?,
            tags: tags?,
            count_comments: count_comments?,
        };
        let response = self.assembler.assemble(&primary, &data)?;
        info!(editorial_id = id, "Editorial resolved");
        Ok(EditorialDocument::Resolved(Box::new(response)))
    }

    /// Start the single batched membership rewrite as soon as the site is known.
    fn spawn_membership_links(
        &self,
        editorial: &Editorial,
        section: &Section,
    ) -> Option<JoinHandle<Result<Option<HashMap<String, String>>>>> {
        let urls: Vec<String> = bodies(editorial).iter().flat_map(|b| b.membership_urls()).collect();
        let urls = dedup_ids(urls.iter().map(String::as_str));
        if urls.is_empty() {
            return None;
        }

        let port = self.backends.membership.clone();
        let editorial_id = editorial.id.clone();
        let site = section.site_encoding();
        debug!(editorial_id = %editorial_id, urls = urls.len(), "Requesting membership link rewrite");
        Some(tokio::spawn(async move {
            let rewritten = port.rewrite_membership_links(&editorial_id, &urls, site).await;
            degrade(DegradedOperation::MembershipLinks, &editorial_id, rewritten)
        }))
    }

    async fn resolve_bundles(
        &self,
        ids: Vec<String>,
        operation: DegradedOperation,
    ) -> Result<Vec<(String, ResolvedBundle)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let this = self.clone();
        fan_out(ids, move |id| {
            let this = this.clone();
            async move { this.build_bundle(&id, operation).await }
        })
        .await
    }

    /// Shared routine for inserted-news and recommended references.
    async fn build_bundle(&self, id: &str, operation: DegradedOperation) -> Result<Option<ResolvedBundle>> {
        let fetched = self.backends.editorials.find_editorial_by_id(id).await;
        let Some(editorial) = degrade(operation, id, fetched)? else {
            return Ok(None);
        };
        if !editorial.is_visible() {
            debug!(editorial_id = id, operation = operation.as_str(), "Referenced editorial not visible, skipping");
            return Ok(None);
        }

        let fetched = self.backends.sections.find_section_by_id(&editorial.section_id).await;
        let Some(section) = degrade(operation, id, fetched)? else {
            return Ok(None);
        };

        let (signatures, media) = tokio::join!(
            self.signatures.resolve_all(&editorial.signatures, &section, editorial.kind.wants_twitter()),
            self.bundle_media(&editorial),
        );
        let signatures = signatures?;

        let multimedia_id = editorial
            .multimedia
            .photo_id()
            .or(editorial.meta_image.as_deref())
            .map(str::to_string);
        let multimedia = match media? {
            BundleMedia::None => None,
            BundleMedia::Resolved(multimedia) => Some(multimedia),
            BundleMedia::Failed => return Ok(None),
        };

        Ok(Some(ResolvedBundle {
            bundle: EditorialBundle {
                editorial,
                section,
                signatures,
                multimedia_id,
            },
            multimedia,
        }))
    }

    /// Inline multimedia failures only cost the thumbnail; a failed meta image drops the bundle.
    async fn bundle_media(&self, editorial: &Editorial) -> Result<BundleMedia> {
        if let Some(id) = editorial.multimedia.photo_id() {
            let resolved = self
                .resolve_optional_multimedia(Some(id), Placement::Inline, DegradedOperation::Multimedia)
                .await?;
            return Ok(resolved.map_or(BundleMedia::None, BundleMedia::Resolved));
        }
        let Some(meta_image) = editorial.meta_image.as_deref() else {
            return Ok(BundleMedia::None);
        };
        match self.resolve_multimedia(meta_image, Placement::Opening).await {
            Ok(Some(resolved)) => Ok(BundleMedia::Resolved(resolved)),
            Ok(None) => Ok(BundleMedia::None),
            Err(e) if e.is_configuration() => Err(e),
            Err(e) => {
                warn!(
                    editorial_id = %editorial.id,
                    meta_image,
                    error = %e,
                    "Meta image failed, dropping referenced editorial"
                );
                AggregatorMetrics::record_degraded(DegradedOperation::OpeningMultimedia);
                Ok(BundleMedia::Failed)
            }
        }
    }

    async fn resolve_optional_multimedia(
        &self,
        id: Option<&str>,
        placement: Placement,
        operation: DegradedOperation,
    ) -> Result<Option<ResolvedMultimedia>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let resolved = self.resolve_multimedia(id, placement).await;
        Ok(degrade(operation, id, resolved)?.flatten())
    }

    /// Fetch a multimedia entity and the resource its type needs; unknown types resolve to nothing.
    async fn resolve_multimedia(&self, id: &str, placement: Placement) -> Result<Option<ResolvedMultimedia>> {
        let port = &self.backends.multimedia;
        let multimedia = port.find_multimedia_by_id(id).await?;
        let resource = match &multimedia {
            Multimedia::Photo(photo) => Some(MediaResource::Photo(port.find_photo_by_id(&photo.resource_id).await?)),
            Multimedia::Widget(widget) => {
                Some(MediaResource::Widget(port.find_widget_by_id(&widget.resource_id).await?))
            }
            Multimedia::EmbedVideo(_) => None,
            Multimedia::Unknown => {
                warn!(multimedia_id = id, "Unsupported multimedia type, skipping");
                return Ok(None);
            }
        };
        Ok(Some(ResolvedMultimedia {
            multimedia,
            resource,
            placement,
        }))
    }

    async fn resolve_photos(&self, ids: Vec<String>) -> Result<Vec<(String, crate::domain::Photo)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let port = self.backends.multimedia.clone();
        fan_out(ids, move |id| {
            let port = port.clone();
            async move {
                let fetched = port.find_photo_by_id(&id).await;
                degrade(DegradedOperation::BodyPhoto, &id, fetched)
            }
        })
        .await
    }

    async fn resolve_tags(&self, ids: &[String]) -> Result<Vec<crate::domain::Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let port = self.backends.tags.clone();
        let tags = fan_out(ids.to_vec(), move |id| {
            let port = port.clone();
            async move {
                let fetched = port.find_tag_by_id(&id).await;
                degrade(DegradedOperation::Tag, &id, fetched)
            }
        })
        .await?;
        Ok(tags.into_iter().map(|(_, tag)| tag).collect())
    }

    async fn resolve_comments_count(&self, id: &str) -> Result<u64> {
        let fetched = self.backends.legacy.find_comments_count_by_editorial_id(id).await;
        Ok(degrade(DegradedOperation::CommentsCount, id, fetched)?.unwrap_or(0))
    }
}

/// Primary body followed by the standfirst, when present.
fn bodies(editorial: &Editorial) -> Vec<&Body> {
    std::iter::once(&editorial.body)
        .chain(editorial.standfirst.as_ref())
        .collect()
}

fn store_bundle_multimedia(data: &mut ResolveData, resolved: &ResolvedBundle) {
    let (Some(id), Some(multimedia)) = (&resolved.bundle.multimedia_id, &resolved.multimedia) else {
        return;
    };
    let target = match multimedia.placement {
        Placement::Opening => &mut data.opening_by_id,
        Placement::Inline => &mut data.multimedia_by_id,
    };
    target.entry(id.clone()).or_insert_with(|| multimedia.clone());
}
