//! REST implementation of the remote-collaborator traits.
//!
//! Talks to a managed backend exposing a PostgREST-style rows API
//! (`/rest/v1/{table}` with predicate query params), a storage upload
//! path (`/storage/v1/object/{path}`), and named serverless functions
//! (`/functions/v1/{name}`). Row predicates carry the owner scoping;
//! the backend's row-level rules enforce it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use tracing::{debug, instrument};

use forward_core::defaults::{PARSE_SYLLABUS_FN, PROFILE_TABLE, TODO_TABLE};
use forward_core::{
    AssignmentStatus, BlobStore, Error, ExtractedTodo, ParseSyllabusRequest,
    ParseSyllabusResponse, Profile, ProfileStore, Result, SyllabusParser, TodoStore,
};

use crate::config::RemoteConfig;

/// HTTP client for the managed backend.
pub struct RestRemote {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestRemote {
    /// Build a client from the given configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.trimmed_base().to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    /// Map an error status to the client error taxonomy.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Error::Remote(format!("permission denied: {body}")))
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound(body)),
            _ => Err(Error::Remote(format!("{status}: {body}"))),
        }
    }
}

#[async_trait]
impl TodoStore for RestRemote {
    #[instrument(skip(self), fields(table = TODO_TABLE))]
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ExtractedTodo>> {
        let response = self
            .authed(self.client.get(self.rest_url(TODO_TABLE)))
            .query(&[
                ("select", "*"),
                ("owner_id", &format!("eq.{owner_id}")),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;
        let todos: Vec<ExtractedTodo> = Self::check(response).await?.json().await?;
        debug!(result_count = todos.len(), "listed todos");
        Ok(todos)
    }

    #[instrument(skip(self), fields(table = TODO_TABLE))]
    async fn update_status(&self, id: &str, status: AssignmentStatus) -> Result<()> {
        let response = self
            .authed(self.client.patch(self.rest_url(TODO_TABLE)))
            .query(&[("id", &format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(table = TODO_TABLE))]
    async fn mark_transferred(&self, id: &str) -> Result<()> {
        let response = self
            .authed(self.client.patch(self.rest_url(TODO_TABLE)))
            .query(&[("id", &format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "transferred": true }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(table = TODO_TABLE))]
    async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .authed(self.client.delete(self.rest_url(TODO_TABLE)))
            .query(&[("id", &format!("eq.{id}"))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for RestRemote {
    #[instrument(skip(self), fields(table = PROFILE_TABLE))]
    async fn fetch(&self, owner_id: &str) -> Result<Profile> {
        let response = self
            .authed(self.client.get(self.rest_url(PROFILE_TABLE)))
            .query(&[
                ("select", "*"),
                ("owner_id", &format!("eq.{owner_id}")),
                ("limit", "1"),
            ])
            .send()
            .await?;
        let mut rows: Vec<Profile> = Self::check(response).await?.json().await?;
        rows.pop()
            .ok_or_else(|| Error::NotFound(format!("profile {owner_id}")))
    }
}

#[async_trait]
impl BlobStore for RestRemote {
    #[instrument(skip(self, bytes), fields(payload_len = bytes.len()))]
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, path);
        let response = self
            .authed(self.client.post(url))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}", self.base_url, path)
    }
}

#[async_trait]
impl SyllabusParser for RestRemote {
    #[instrument(skip(self, req), fields(file_name = %req.file_name))]
    async fn parse(&self, req: ParseSyllabusRequest) -> Result<ParseSyllabusResponse> {
        let url = format!("{}/functions/v1/{}", self.base_url, PARSE_SYLLABUS_FN);
        let response = self.authed(self.client.post(url)).json(&req).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
