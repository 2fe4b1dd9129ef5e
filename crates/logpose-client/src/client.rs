//! Thin reqwest client for the Log Pose REST API.

use std::time::Duration;

use anyhow::Context;
use logpose_core::{
    proto::{
        CurrentWaypointResponse, ErrorResponse, ReplaceWaypointsRequest, SetActiveRequest,
        SetActiveResponse, VerifyRequest, VerifyResponse, WaypointsResponse,
    },
    LogPoseError, WaypointDraft,
};
use serde::de::DeserializeOwned;

pub type Result<T> = std::result::Result<T, LogPoseError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn current(&self) -> Result<CurrentWaypointResponse> {
        let resp = self
            .http
            .get(self.url("/api/current"))
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    pub async fn locations(&self) -> Result<WaypointsResponse> {
        let resp = self
            .http
            .get(self.url("/api/locations"))
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    pub async fn set_active(&self, secret: &str, index: usize) -> Result<SetActiveResponse> {
        let resp = self
            .http
            .post(self.url("/api/current"))
            .json(&SetActiveRequest::new(secret, index))
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    pub async fn replace(
        &self,
        secret: &str,
        drafts: &[WaypointDraft],
    ) -> Result<WaypointsResponse> {
        let body = ReplaceWaypointsRequest::new(secret, drafts)?;
        let resp = self
            .http
            .post(self.url("/api/locations"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    pub async fn verify(&self, secret: &str) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/api/auth/verify"))
            .json(&VerifyRequest {
                password: secret.to_string(),
            })
            .send()
            .await
            .map_err(transport)?;
        let _: VerifyResponse = decode(resp).await?;
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> LogPoseError {
    LogPoseError::Internal(anyhow::Error::new(e).context("request to logpose-server failed"))
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return resp.json::<T>().await.map_err(|e| {
            LogPoseError::Internal(anyhow::Error::new(e).context("bad response body"))
        });
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(LogPoseError::from_status(status.as_u16(), message))
}
