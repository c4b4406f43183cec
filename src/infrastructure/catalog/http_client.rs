use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::dashboard::{
    CatalogApi, CourseSummary, DashboardServiceError, EnrollmentSummary, ListPage, ListQuery,
    StudentSummary,
};

/// Client for the upstream admin API list endpoints
pub struct HttpCatalogClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &ListQuery,
    ) -> Result<ListPage<T>, DashboardServiceError> {
        let url = format!("{}/{}", self.base_url, resource);

        let mut params = vec![("limit", query.limit.to_string())];
        if query.newest_first {
            params.push(("sortBy", "createdAt".to_string()));
            params.push(("sortOrder", "desc".to_string()));
        }

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| DashboardServiceError::Upstream(format!("GET {} failed: {}", url, e)))?;

        let response = response.error_for_status().map_err(|e| {
            DashboardServiceError::Upstream(format!("GET {} returned an error: {}", url, e))
        })?;

        response.json::<ListPage<T>>().await.map_err(|e| {
            DashboardServiceError::Upstream(format!("GET {} returned an invalid body: {}", url, e))
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_students(
        &self,
        query: &ListQuery,
    ) -> Result<ListPage<StudentSummary>, DashboardServiceError> {
        self.list("students", query).await
    }

    async fn list_courses(
        &self,
        query: &ListQuery,
    ) -> Result<ListPage<CourseSummary>, DashboardServiceError> {
        self.list("courses", query).await
    }

    async fn list_enrollments(
        &self,
        query: &ListQuery,
    ) -> Result<ListPage<EnrollmentSummary>, DashboardServiceError> {
        self.list("enrollments", query).await
    }
}
