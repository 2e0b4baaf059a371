use super::{ApiError, HelpdeskClient};
use crate::api::types::{Document, QaPair};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use std::path::Path;

#[allow(async_fn_in_trait)]
pub trait KnowledgeApi {
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError>;
    async fn upload_document(&self, path: &Path) -> Result<Document, ApiError>;
    async fn delete_document(&self, document_id: i64) -> Result<(), ApiError>;

    /// Asks the backend to rebuild its search index from the stored documents.
    async fn reindex(&self) -> Result<(), ApiError>;

    async fn add_qa_pair(&self, pair: &QaPair) -> Result<(), ApiError>;
}

impl KnowledgeApi for HelpdeskClient {
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        let request = self.authed(Method::GET, "/api/admin/knowledge/documents")?;
        self.send_json(request).await
    }

    async fn upload_document(&self, path: &Path) -> Result<Document, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let request = self
            .authed(Method::POST, "/api/admin/knowledge/documents")?
            .multipart(form);
        self.send_json(request).await
    }

    async fn delete_document(&self, document_id: i64) -> Result<(), ApiError> {
        let request = self.authed(
            Method::DELETE,
            &format!("/api/admin/knowledge/documents/{document_id}"),
        )?;
        self.send_empty(request).await
    }

    async fn reindex(&self) -> Result<(), ApiError> {
        let request = self.authed(Method::POST, "/api/admin/knowledge/reindex")?;
        self.send_empty(request).await
    }

    async fn add_qa_pair(&self, pair: &QaPair) -> Result<(), ApiError> {
        let request = self
            .authed(Method::POST, "/api/admin/knowledge/qa")?
            .json(pair);
        self.send_empty(request).await
    }
}
