//! reqwest adapters for every backend port.
//!
//! One [`ServiceClient`] owns a shared connection pool and the per-service
//! base URLs. Status handling lives in [`check_response`] so each port method
//! only builds its request and maps the body.

use async_trait::async_trait;
use reqwest::header::HOST;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::app::ports::{
    EditorialPort, JournalistPort, LegacyPort, MembershipPort, MultimediaPort, SectionPort, TagPort,
};
use crate::config::ServicesConfig;
use crate::domain::{Editorial, Journalist, Multimedia, Photo, Section, Tag, Widget};
use crate::error::{EditorialError, Result};

const USER_AGENT: &str = concat!("editorial_api/", env!("CARGO_PKG_VERSION"));

/// Map 404 to [`EditorialError::NotFound`] and any other non-success status to [`EditorialError::Api`].
pub async fn check_response(resp: reqwest::Response, entity: &'static str, id: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(EditorialError::not_found(entity, id));
    }
    if !status.is_success() {
        return Err(EditorialError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MembershipLinksRequest<'a> {
    editorial_id: &'a str,
    site: &'a str,
    urls: &'a [String],
}

pub struct ServiceClient {
    client: reqwest::Client,
    services: ServicesConfig,
}

impl ServiceClient {
    pub fn new(services: ServicesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(services.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, services })
    }

    fn url(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, base: &str, path: &str, entity: &'static str, id: &str) -> Result<T> {
        let url = Self::url(base, path);
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        let resp = check_response(resp, entity, id).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn get_legacy(&self, path: &str, entity: &'static str, id: &str) -> Result<serde_json::Value> {
        let url = Self::url(&self.services.legacy_url, path);
        debug!("GET {} (legacy)", url);
        let mut request = self.client.get(&url);
        if let Some(host) = &self.services.legacy_host_header {
            request = request.header(HOST, host);
        }
        let resp = check_response(request.send().await?, entity, id).await?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl EditorialPort for ServiceClient {
    async fn find_editorial_by_id(&self, id: &str) -> Result<Editorial> {
        self.get_json(&self.services.editorial_url, &format!("editorials/{}", id), "Editorial", id)
            .await
    }
}

#[async_trait]
impl SectionPort for ServiceClient {
    async fn find_section_by_id(&self, id: &str) -> Result<Section> {
        self.get_json(&self.services.section_url, &format!("sections/{}", id), "Section", id)
            .await
    }
}

#[async_trait]
impl JournalistPort for ServiceClient {
    async fn find_journalist_by_alias(&self, alias_id: &str) -> Result<Journalist> {
        self.get_json(
            &self.services.journalist_url,
            &format!("aliases/{}/journalist", alias_id),
            "Journalist",
            alias_id,
        )
        .await
    }
}

#[async_trait]
impl TagPort for ServiceClient {
    async fn find_tag_by_id(&self, id: &str) -> Result<Tag> {
        self.get_json(&self.services.tag_url, &format!("tags/{}", id), "Tag", id).await
    }
}

#[async_trait]
impl MultimediaPort for ServiceClient {
    async fn find_multimedia_by_id(&self, id: &str) -> Result<Multimedia> {
        self.get_json(&self.services.multimedia_url, &format!("multimedia/{}", id), "Multimedia", id)
            .await
    }

    async fn find_photo_by_id(&self, id: &str) -> Result<Photo> {
        self.get_json(&self.services.multimedia_url, &format!("photos/{}", id), "Photo", id)
            .await
    }

    async fn find_widget_by_id(&self, id: &str) -> Result<Widget> {
        self.get_json(&self.services.multimedia_url, &format!("widgets/{}", id), "Widget", id)
            .await
    }
}

#[async_trait]
impl MembershipPort for ServiceClient {
    async fn rewrite_membership_links(
        &self,
        editorial_id: &str,
        urls: &[String],
        site_encoding: &str,
    ) -> Result<HashMap<String, String>> {
        if urls.is_empty() {
            return Ok(HashMap::new());
        }
        let url = Self::url(&self.services.membership_url, "membership/links");
        debug!("POST {} ({} urls)", url, urls.len());
        let body = MembershipLinksRequest { editorial_id, site: site_encoding, urls };
        let resp = self.client.post(&url).json(&body).send().await?;
        let rewritten: Vec<String> = check_response(resp, "MembershipLinks", editorial_id).await?.json().await?;
        zip_membership_links(urls, rewritten)
    }
}

/// Pair the service's positional answer with the urls that were sent.
fn zip_membership_links(urls: &[String], rewritten: Vec<String>) -> Result<HashMap<String, String>> {
    if rewritten.len() != urls.len() {
        return Err(EditorialError::Api {
            status: 200,
            message: format!("membership service returned {} urls for {}", rewritten.len(), urls.len()),
        });
    }
    Ok(urls.iter().cloned().zip(rewritten).collect())
}

#[async_trait]
impl LegacyPort for ServiceClient {
    async fn find_legacy_editorial_by_id(&self, id: &str) -> Result<serde_json::Value> {
        self.get_legacy(&format!("service/content/{}/", id), "LegacyEditorial", id).await
    }

    async fn find_comments_count_by_editorial_id(&self, id: &str) -> Result<u64> {
        let payload = self
            .get_legacy(&format!("service/community/comments/editorial/{}/0/0/", id), "Comments", id)
            .await?;
        Ok(comments_total(&payload))
    }
}

fn comments_total(payload: &serde_json::Value) -> u64 {
    let total = &payload["options"]["totalrecords"];
    total
        .as_u64()
        .or_else(|| total.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_without_double_slashes() {
        assert_eq!(ServiceClient::url("http://api/", "/editorials/1"), "http://api/editorials/1");
        assert_eq!(ServiceClient::url("http://api", "editorials/1"), "http://api/editorials/1");
    }

    #[test]
    fn test_comments_total_accepts_numbers_and_strings() {
        assert_eq!(comments_total(&json!({"options": {"totalrecords": 12}})), 12);
        assert_eq!(comments_total(&json!({"options": {"totalrecords": "7"}})), 7);
        assert_eq!(comments_total(&json!({"data": []})), 0);
    }

    #[test]
    fn test_zip_membership_links() {
        let urls = vec!["a".to_string(), "b".to_string()];
        let map = zip_membership_links(&urls, vec!["A".into(), "B".into()]).unwrap();
        assert_eq!(map.get("b").map(String::as_str), Some("B"));

        assert!(zip_membership_links(&urls, vec!["A".into()]).is_err());
    }

    #[test]
    fn test_membership_request_shape() {
        let urls = vec!["https://x".to_string()];
        let body = MembershipLinksRequest { editorial_id: "1", site: "elconfidencial", urls: &urls };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"editorialId": "1", "site": "elconfidencial", "urls": ["https://x"]})
        );
    }
}
