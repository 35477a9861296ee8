use reqwest::header::COOKIE;
use reqwest::{Method, Url};
use serde::Serialize;

use crate::{ApiError, DeleteAck, ErrorKind, Task};

/// Where the remote transcription service lives.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
        }
    }
}

/// Session credentials forwarded with every call.
///
/// The service scopes tasks to a `session_id` cookie it issues on first
/// contact; an explicit id here is sent on top of whatever the client's
/// cookie store has accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: Option<String>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
        }
    }

    fn cookie(&self) -> Option<String> {
        self.session_id
            .as_ref()
            .map(|id| format!("session_id={id}"))
    }
}

/// The three remote operations the client needs.
#[async_trait::async_trait]
pub trait TaskApi: Send + Sync {
    /// Submits a video URL for transcription and summarization.
    ///
    /// No retry and no client-imposed timeout: a failure is surfaced
    /// immediately and any timeout policy belongs to the service.
    async fn submit(&self, session: &SessionContext, video_url: &str) -> Result<Task, ApiError>;

    /// Fetches the full task list for the session, in service order.
    async fn list_tasks(&self, session: &SessionContext) -> Result<Vec<Task>, ApiError>;

    /// Requests removal of a task by id.
    async fn delete_task(
        &self,
        session: &SessionContext,
        task_id: &str,
    ) -> Result<DeleteAck, ApiError>;
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    youtube_url: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTaskApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        // Normalize so joining endpoint paths keeps any base path segment.
        let base = if settings.base_url.ends_with('/') {
            settings.base_url
        } else {
            format!("{}/", settings.base_url)
        };
        let base_url = Url::parse(&base).map_err(|err| {
            ApiError::new(ErrorKind::InvalidUrl, format!("invalid base url: {err}"))
        })?;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| ApiError::new(ErrorKind::Network, err.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(ErrorKind::InvalidUrl, err.to_string()))
    }

    fn request(
        &self,
        method: Method,
        url: Url,
        session: &SessionContext,
    ) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match session.cookie() {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }
}

#[async_trait::async_trait]
impl TaskApi for HttpTaskApi {
    async fn submit(&self, session: &SessionContext, video_url: &str) -> Result<Task, ApiError> {
        let video_url = video_url.trim();
        if video_url.is_empty() {
            return Err(ApiError::new(ErrorKind::InvalidUrl, "empty video url"));
        }

        let url = self.endpoint("transcribe")?;
        let response = self
            .request(Method::POST, url, session)
            .json(&SubmitBody {
                youtube_url: video_url,
            })
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response).await?;
        response.json::<Task>().await.map_err(map_transport_error)
    }

    async fn list_tasks(&self, session: &SessionContext) -> Result<Vec<Task>, ApiError> {
        let url = self.endpoint("tasks")?;
        let response = self
            .request(Method::GET, url, session)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response).await?;
        response
            .json::<Vec<Task>>()
            .await
            .map_err(map_transport_error)
    }

    async fn delete_task(
        &self,
        session: &SessionContext,
        task_id: &str,
    ) -> Result<DeleteAck, ApiError> {
        let url = self.endpoint(&format!("tasks/{task_id}"))?;
        let response = self
            .request(Method::DELETE, url, session)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response).await?;
        response
            .json::<DeleteAck>()
            .await
            .map_err(map_transport_error)
    }
}

/// Passes 2xx responses through; turns anything else into a `Remote` error
/// carrying the service's `detail` message when one is present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_detail(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status.to_string()
        } else {
            body
        }
    });
    Err(ApiError::new(ErrorKind::Remote(status.as_u16()), message))
}

fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(ToOwned::to_owned)
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    ApiError::new(ErrorKind::Network, err.to_string())
}
