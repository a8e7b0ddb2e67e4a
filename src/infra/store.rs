//! PostgREST adapter for the posts table.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use storyline_api_types::{PostInsertRequest, PostRow, PostUpdateRequest};
use tracing::debug;
use uuid::Uuid;

use crate::application::repos::{PostStore, StoreError};
use crate::config::StoreSettings;
use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostDraft, PostPatch};

use super::error::InfraError;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");
const PREFER_HEADER: HeaderName = HeaderName::from_static("prefer");
const RETURN_REPRESENTATION: HeaderValue = HeaderValue::from_static("return=representation");

#[derive(Clone, Debug)]
pub struct RestPostStore {
    client: Client,
    table_url: Url,
}

impl RestPostStore {
    pub fn new(settings: &StoreSettings) -> Result<Self, InfraError> {
        let key = HeaderValue::from_str(&settings.api_key)
            .map_err(|err| InfraError::http(format!("api key is not a valid header: {err}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|err| InfraError::http(format!("api key is not a valid header: {err}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .default_headers(headers)
            .build()
            .map_err(|err| InfraError::http(err.to_string()))?;

        let table_url = settings
            .url
            .join(&format!("rest/v1/{}", settings.table))
            .map_err(|err| InfraError::http(format!("invalid store url: {err}")))?;

        Ok(Self { client, table_url })
    }

    pub fn user_agent() -> &'static str {
        concat!("storyline/", env!("CARGO_PKG_VERSION"))
    }

    fn request(&self, method: Method, query: &[(&str, String)]) -> RequestBuilder {
        let mut url = self.table_url.clone();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        self.client.request(method, url)
    }

    fn id_filter(id: Uuid) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }

    async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, StoreError> {
        let resp = req.send().await.map_err(StoreError::from_transport)?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, StoreError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(StoreError::from_transport)?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_slice(&bytes).map_err(StoreError::from_decode)
    }

    /// Mutations ask for the affected rows back; an empty array means no row
    /// matched.
    fn single_row(rows: Vec<PostRow>) -> Result<PostRecord, StoreError> {
        rows.into_iter()
            .next()
            .map(PostRecord::from)
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl PostStore for RestPostStore {
    async fn select_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        debug!(table = %self.table_url, "selecting posts");
        let req = self.request(
            Method::GET,
            &[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ],
        );
        let rows: Vec<PostRow> = Self::send(req).await?;
        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn insert_post(&self, draft: &PostDraft) -> Result<PostRecord, StoreError> {
        debug!("inserting post");
        let body = PostInsertRequest {
            title: draft.title.clone(),
            content: draft.content.clone(),
            author: draft.author.clone(),
        };
        let req = self
            .request(Method::POST, &[])
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(&body);
        let rows: Vec<PostRow> = Self::send(req).await?;
        Self::single_row(rows)
    }

    async fn update_post(&self, id: Uuid, patch: &PostPatch) -> Result<PostRecord, StoreError> {
        debug!(%id, "updating post");
        let body = PostUpdateRequest {
            title: patch.title.clone(),
            content: patch.content.clone(),
            author: patch.author.clone(),
        };
        let req = self
            .request(Method::PATCH, &Self::id_filter(id))
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(&body);
        let rows: Vec<PostRow> = Self::send(req).await?;
        Self::single_row(rows)
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError> {
        debug!(%id, "deleting post");
        let req = self
            .request(Method::DELETE, &Self::id_filter(id))
            .header(PREFER_HEADER, RETURN_REPRESENTATION);
        let rows: Vec<PostRow> = Self::send(req).await?;
        Self::single_row(rows).map(|_| ())
    }
}
