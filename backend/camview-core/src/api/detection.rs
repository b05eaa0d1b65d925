//! Detection service configuration and statistics.

use crate::api::CamviewApi;
use crate::error::ApiError;

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Seconds between detection passes accepted by the service.
pub const INTERVAL_RANGE: RangeInclusive<f64> = 0.5..=5.0;
/// Stored-detection confidence floor accepted by the service.
pub const MIN_CONFIDENCE_RANGE: RangeInclusive<f64> = 0.1..=0.9;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub detection_interval: f64,
    #[serde(default)]
    pub min_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatabaseStats {
    #[serde(default)]
    pub total_detections: u64,
    #[serde(default)]
    pub colors: BTreeMap<String, u64>,
    #[serde(default)]
    pub types: BTreeMap<String, u64>,
}

impl DatabaseStats {
    /// The `n` most frequent colours, most frequent first.
    pub fn top_colors(&self, n: usize) -> Vec<(&str, u64)> {
        top(&self.colors, n)
    }

    /// The `n` most frequent clothing types, most frequent first.
    pub fn top_types(&self, n: usize) -> Vec<(&str, u64)> {
        top(&self.types, n)
    }
}

fn top(counts: &BTreeMap<String, u64>, n: usize) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

/// `GET api/clothing/stats`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    #[serde(default)]
    pub service: ServiceStatus,
    #[serde(default)]
    pub database: DatabaseStats,
}

impl ServiceStats {
    /// The service settings in the shape [`CamviewApi::update_detection_config`] takes.
    pub fn config(&self) -> DetectionConfig {
        DetectionConfig {
            enabled: self.service.enabled,
            interval: self.service.detection_interval,
            min_confidence: self.service.min_confidence,
        }
    }
}

/// Body of `POST api/clothing/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub enabled: bool,
    pub interval: f64,
    pub min_confidence: f64,
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !INTERVAL_RANGE.contains(&self.interval) {
            return Err(ApiError::validation(format!(
                "interval must be between {} and {} seconds, got {}",
                INTERVAL_RANGE.start(),
                INTERVAL_RANGE.end(),
                self.interval
            )));
        }
        if !MIN_CONFIDENCE_RANGE.contains(&self.min_confidence) {
            return Err(ApiError::validation(format!(
                "min_confidence must be between {} and {}, got {}",
                MIN_CONFIDENCE_RANGE.start(),
                MIN_CONFIDENCE_RANGE.end(),
                self.min_confidence
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraDetection {
    #[serde(default)]
    pub enabled: bool,
}

/// `GET camera/<id>/status`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraStatus {
    #[serde(default)]
    pub detection: CameraDetection,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Serialize)]
struct DetectionToggle {
    enabled: bool,
}

#[derive(Deserialize)]
struct DetectionToggleResponse {
    detection_enabled: bool,
}

impl CamviewApi {
    /// `GET api/clothing/stats`
    pub async fn service_stats(&self) -> Result<ServiceStats, ApiError> {
        let url = self.client.endpoint("api/clothing/stats")?;
        self.client.get_json(url).await
    }

    /// `POST api/clothing/config`; returns the backend's acknowledgement.
    pub async fn update_detection_config(
        &self,
        config: &DetectionConfig,
    ) -> Result<Value, ApiError> {
        config.validate()?;
        let url = self.client.endpoint("api/clothing/config")?;
        self.client.send_json(Method::POST, url, config).await
    }

    /// `GET camera/<id>/status`
    pub async fn camera_status(&self, camera_id: &str) -> Result<CameraStatus, ApiError> {
        let url = self
            .client
            .endpoint_with_segments("camera/", [camera_id, "status"])?;
        self.client.get_json(url).await
    }

    /// `POST camera/<id>/detection`; returns whether detection is now enabled.
    pub async fn set_camera_detection(
        &self,
        camera_id: &str,
        enabled: bool,
    ) -> Result<bool, ApiError> {
        let url = self
            .client
            .endpoint_with_segments("camera/", [camera_id, "detection"])?;
        let response: DetectionToggleResponse = self
            .client
            .send_json(Method::POST, url, &DetectionToggle { enabled })
            .await?;
        Ok(response.detection_enabled)
    }
}
