use std::sync::Arc;
use tracing::{debug, warn};

use crate::app::fan_out::{degrade, fan_out};
use crate::app::ports::JournalistPort;
use crate::domain::Section;
use crate::error::Result;
use crate::observability::DegradedOperation;
use crate::response::Signature;
use crate::transform::signature::format_signature;
use crate::transform::RenderSettings;

/// Alias id -> signature, tolerating unknown aliases and directory failures.
#[derive(Clone)]
pub struct SignatureResolver {
    journalists: Arc<dyn JournalistPort>,
    settings: Arc<RenderSettings>,
}

impl SignatureResolver {
    pub fn new(journalists: Arc<dyn JournalistPort>, settings: Arc<RenderSettings>) -> Self {
        Self { journalists, settings }
    }

    /// `Ok(None)` when the alias is unknown or the lookup failed; errors are wiring defects only.
    pub async fn resolve(&self, alias_id: &str, section: &Section, wants_twitter: bool) -> Result<Option<Signature>> {
        let lookup = self.journalists.find_journalist_by_alias(alias_id).await;
        let Some(journalist) = degrade(DegradedOperation::Signature, alias_id, lookup)? else {
            return Ok(None);
        };
        match journalist.alias(alias_id) {
            Some(alias) => Ok(Some(format_signature(alias, &journalist, section, wants_twitter, &self.settings))),
            None => {
                debug!(alias_id, journalist_id = %journalist.id, "Alias not among journalist aliases, omitting signature");
                Ok(None)
            }
        }
    }

    /// Resolve every alias concurrently, keeping byline order and dropping misses.
    pub async fn resolve_all(&self, alias_ids: &[String], section: &Section, wants_twitter: bool) -> Result<Vec<Signature>> {
        if alias_ids.is_empty() {
            return Ok(Vec::new());
        }
        let section = Arc::new(section.clone());
        let resolver = self.clone();
        let resolved = fan_out(alias_ids.to_vec(), move |alias_id| {
            let resolver = resolver.clone();
            let section = section.clone();
            async move { resolver.resolve(&alias_id, &section, wants_twitter).await }
        })
        .await?;
        if resolved.len() < alias_ids.len() {
            warn!(requested = alias_ids.len(), resolved = resolved.len(), "Some signatures were omitted");
        }
        Ok(resolved.into_iter().map(|(_, signature)| signature).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Alias, Journalist};
    use crate::error::EditorialError;
    use crate::transform::fixtures;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockJournalists {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl JournalistPort for MockJournalists {
        async fn find_journalist_by_alias(&self, alias_id: &str) -> Result<Journalist> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match alias_id {
                "boom" => Err(EditorialError::Api { status: 500, message: "down".into() }),
                "missing" => Err(EditorialError::not_found("Journalist", alias_id)),
                _ => Ok(Journalist {
                    id: "j1".into(),
                    name: "Ana".into(),
                    visible: true,
                    aliases: vec![
                        Alias { id: "a1".into(), name: "Ana".into(), private: false },
                        Alias { id: "a2".into(), name: "A. R.".into(), private: true },
                    ],
                    departments: vec![],
                    photo: None,
                    blog_photo: None,
                    twitter: Some("ana".into()),
                }),
            }
        }
    }

    fn resolver() -> (SignatureResolver, Arc<MockJournalists>) {
        let port = Arc::new(MockJournalists { calls: AtomicUsize::new(0) });
        (SignatureResolver::new(port.clone(), Arc::new(fixtures::settings())), port)
    }

    #[tokio::test]
    async fn test_alias_outside_journalist_is_absent() {
        let (resolver, _) = resolver();
        let result = resolver.resolve("a9", &fixtures::section(), false).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_absent_not_error() {
        let (resolver, _) = resolver();
        assert!(resolver.resolve("boom", &fixtures::section(), false).await.unwrap().is_none());
        assert!(resolver.resolve("missing", &fixtures::section(), false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_order_and_omits_misses() {
        let (resolver, port) = resolver();
        let ids: Vec<String> = ["a2", "boom", "a9", "a1"].iter().map(|s| s.to_string()).collect();
        let signatures = resolver.resolve_all(&ids, &fixtures::section(), true).await.unwrap();

        let aliases: Vec<&str> = signatures.iter().map(|s| s.alias_id.as_str()).collect();
        assert_eq!(aliases, vec!["a2", "a1"]);
        assert!(signatures[0].private);
        assert_eq!(signatures[1].twitter.as_deref(), Some("@ana"));
        assert_eq!(port.calls.load(Ordering::SeqCst), 4);
    }
}
