use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::{Project, ProjectDraft, User, UserDraft};
use crate::validation::{validate_project, validate_user};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Error payload returned by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Payload of `GET /`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerStatus {
    pub message: String,
}

/// Blocking client for the projects/users backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    fn send(&self, request: RequestBuilder, method: &str, path: &str, fallback: &str) -> Result<Response, ApiError> {
        let response = request.send().map_err(|e| {
            warn!(method, path, error = %e, "request failed");
            ApiError::Transport(e)
        })?;
        let status = response.status();
        debug!(method, path, status = status.as_u16(), "api call");
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.detail)
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| fallback.to_string());
        warn!(method, path, status = status.as_u16(), %detail, "api error");
        Err(ApiError::Status { status: status.as_u16(), detail })
    }

    fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T, ApiError> {
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { what, source })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, what: &'static str, fallback: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.send(self.client.get(url), "GET", path, fallback)?;
        Self::decode(response, what)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, what: &'static str, fallback: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.send(self.client.post(url).json(body), "POST", path, fallback)?;
        Self::decode(response, what)
    }

    fn patch_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, what: &'static str, fallback: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.send(self.client.patch(url).json(body), "PATCH", path, fallback)?;
        Self::decode(response, what)
    }

    fn delete(&self, path: &str, fallback: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.send(self.client.delete(url), "DELETE", path, fallback)?;
        Ok(())
    }

    fn checked_project(project: Project) -> Result<Project, ApiError> {
        validate_project(&project)?;
        Ok(project)
    }

    fn checked_user(user: User) -> Result<User, ApiError> {
        validate_user(&user)?;
        Ok(user)
    }

    /// `GET /` health check.
    pub fn status(&self) -> Result<ServerStatus, ApiError> {
        self.get_json("", "server status", "backend is not responding")
    }

    pub fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        let projects: Vec<Project> = self.get_json("projects", "project list", "failed to fetch projects")?;
        projects.iter().try_for_each(validate_project)?;
        debug!(count = projects.len(), "fetched projects");
        Ok(projects)
    }

    pub fn get_project(&self, id: u64) -> Result<Project, ApiError> {
        let project = self.get_json(&format!("projects/{}", id), "project", "failed to fetch project")?;
        Self::checked_project(project)
    }

    pub fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let project = self.post_json("projects", draft, "created project", "failed to create project")?;
        Self::checked_project(project)
    }

    pub fn update_project(&self, id: u64, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let project = self.patch_json(&format!("projects/{}", id), draft, "updated project", "failed to update project")?;
        Self::checked_project(project)
    }

    pub fn delete_project(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("projects/{}", id), "failed to delete project")
    }

    pub fn get_users(&self) -> Result<Vec<User>, ApiError> {
        let users: Vec<User> = self.get_json("users/", "user list", "failed to fetch users")?;
        users.iter().try_for_each(validate_user)?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    pub fn get_user(&self, id: u64) -> Result<User, ApiError> {
        let user = self.get_json(&format!("users/{}", id), "user", "failed to fetch user")?;
        Self::checked_user(user)
    }

    pub fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let user = self.post_json("users/", draft, "created user", "failed to create user")?;
        Self::checked_user(user)
    }

    pub fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, ApiError> {
        let user = self.patch_json(&format!("users/{}", id), draft, "updated user", "failed to update user")?;
        Self::checked_user(user)
    }

    pub fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("users/{}", id), "failed to delete user")
    }
}
