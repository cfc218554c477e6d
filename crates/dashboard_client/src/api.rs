use std::time::Duration;

use dashboard_core::{JobId, ParametricJob, Request, RequestId};
use dashboard_logging::{dash_debug, dash_info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::options::parse_options;
use crate::{ApiError, FailureKind};

/// Path that accepts new requests.
pub const CREATE_REQUEST_PATH: &str = "/requests/api/v1.0";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Root of the dashboard; may carry a path prefix such as `/lz`.
    pub base_url: String,
    /// Endpoint backing the main table.
    pub table_source: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            table_source: "/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The dashboard backend, seen from the browser side.
#[async_trait::async_trait]
pub trait RequestsApi: Send + Sync {
    async fn list_requests(&self) -> Result<Vec<Request>, ApiError>;

    /// Detail view of one or several requests, as served.
    async fn request_info(&self, ids: &[RequestId]) -> Result<String, ApiError>;

    async fn parametric_jobs(&self, request_id: RequestId)
        -> Result<Vec<ParametricJob>, ApiError>;

    async fn reschedule_job(&self, job_id: JobId) -> Result<(), ApiError>;

    async fn approve_request(&self, id: RequestId) -> Result<(), ApiError>;

    async fn delete_request(&self, id: RequestId) -> Result<(), ApiError>;

    async fn create_request(&self, fields: &[(String, String)]) -> Result<(), ApiError>;

    async fn update_request(
        &self,
        id: RequestId,
        fields: &[(String, String)],
    ) -> Result<(), ApiError>;

    async fn tags(&self) -> Result<Vec<String>, ApiError>;

    async fn app_versions(&self, app: &str) -> Result<Vec<String>, ApiError>;
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base: Url,
    table_source: String,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        // Endpoints resolve below the base path, e.g. `http://host/lz/` + `api`.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base,
            table_source: settings.table_source,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        dash_debug!("{} {}", status.as_u16(), response.url());
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        response.text().await.map_err(map_reqwest_error)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(self.client.get(self.url(path)?)).await?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        Ok(envelope.data)
    }

    async fn put_form(&self, path: &str, fields: &[(String, String)]) -> Result<(), ApiError> {
        self.send(self.client.put(self.url(path)?).form(fields))
            .await
            .map(drop)
    }
}

#[async_trait::async_trait]
impl RequestsApi for ReqwestApi {
    async fn list_requests(&self) -> Result<Vec<Request>, ApiError> {
        self.get_data(&self.table_source).await
    }

    async fn request_info(&self, ids: &[RequestId]) -> Result<String, ApiError> {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.send(self.client.get(self.url(&format!("/api/{joined}"))?))
            .await
    }

    async fn parametric_jobs(
        &self,
        request_id: RequestId,
    ) -> Result<Vec<ParametricJob>, ApiError> {
        self.get_data(&format!("/parametricjobs/{request_id}")).await
    }

    async fn reschedule_job(&self, job_id: JobId) -> Result<(), ApiError> {
        dash_info!("Rescheduling parametric job {}", job_id);
        self.put_form(
            &format!("/parametricjobs/{job_id}"),
            &[("reschedule".to_string(), "true".to_string())],
        )
        .await
    }

    async fn approve_request(&self, id: RequestId) -> Result<(), ApiError> {
        dash_info!("Approving request {}", id);
        self.put_form(
            &format!("/api/{id}"),
            &[("status".to_string(), "Approved".to_string())],
        )
        .await
    }

    async fn delete_request(&self, id: RequestId) -> Result<(), ApiError> {
        dash_info!("Deleting request {}", id);
        self.send(self.client.delete(self.url(&format!("/api/{id}"))?))
            .await
            .map(drop)
    }

    async fn create_request(&self, fields: &[(String, String)]) -> Result<(), ApiError> {
        dash_info!("Submitting new request with {} field(s)", fields.len());
        self.send(self.client.post(self.url(CREATE_REQUEST_PATH)?).form(fields))
            .await
            .map(drop)
    }

    async fn update_request(
        &self,
        id: RequestId,
        fields: &[(String, String)],
    ) -> Result<(), ApiError> {
        dash_info!("Updating request {}", id);
        self.put_form(&format!("/api/{id}"), fields).await
    }

    async fn tags(&self) -> Result<Vec<String>, ApiError> {
        let body = self.send(self.client.get(self.url("/tags")?)).await?;
        Ok(parse_options(&body))
    }

    async fn app_versions(&self, app: &str) -> Result<Vec<String>, ApiError> {
        let mut url = self.url("/appversion/")?;
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
            .pop_if_empty()
            .push(app);
        let body = self.send(self.client.get(url)).await?;
        Ok(parse_options(&body))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
