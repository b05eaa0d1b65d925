//! Recorded video browsing.
//!
//! The backend omits fields on older recordings; [`Recording`] fills them with
//! display defaults so list rows always render.

use crate::api::CamviewApi;
use crate::error::ApiError;

use serde::{Deserialize, Serialize};
use url::Url;

const UNKNOWN_CAMERA: &str = "unknown";
const UNNAMED_FILE: &str = "Sin nombre";
const UNDATED: &str = "Sin fecha";
const DEFAULT_HOUR: &str = "00";
const DEFAULT_TIME: &str = "00-00-00";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecording")]
pub struct Recording {
    pub camera_id: String,
    pub filename: String,
    /// Relative to the `recordings/` root, e.g. `cam1/2023-12-10/14/file.mp4`.
    pub path: String,
    pub date: String,
    pub hour: String,
    /// `HH-MM-SS`
    pub time: String,
    pub size_bytes: u64,
    pub size_mb: f64,
}

impl Recording {
    /// `time` as `HH:MM:SS`.
    pub fn display_time(&self) -> String {
        self.time.replace('-', ":")
    }

    pub fn is_playable(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Deserialize)]
struct RawRecording {
    #[serde(default)]
    camera_id: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    hour: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    size_bytes: Option<u64>,
    #[serde(default)]
    size_mb: Option<f64>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl From<RawRecording> for Recording {
    fn from(raw: RawRecording) -> Self {
        Self {
            camera_id: or_default(raw.camera_id, UNKNOWN_CAMERA),
            filename: or_default(raw.filename, UNNAMED_FILE),
            path: raw.path.unwrap_or_default(),
            date: or_default(raw.date, UNDATED),
            hour: or_default(raw.hour, DEFAULT_HOUR),
            time: or_default(raw.time, DEFAULT_TIME),
            size_bytes: raw.size_bytes.unwrap_or(0),
            size_mb: raw.size_mb.unwrap_or(0.0),
        }
    }
}

/// Optional narrowing of recording queries. Empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingFilter {
    pub camera_id: Option<String>,
    pub date: Option<String>,
    pub hour: Option<String>,
}

impl RecordingFilter {
    pub fn camera(mut self, camera_id: impl Into<String>) -> Self {
        self.camera_id = Some(camera_id.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn hour(mut self, hour: impl Into<String>) -> Self {
        self.hour = Some(hour.into());
        self
    }

    fn apply(&self, url: &mut Url) {
        append_param(url, "camera_id", self.camera_id.as_deref());
        append_param(url, "date", self.date.as_deref());
        append_param(url, "hour", self.hour.as_deref());
    }
}

pub(crate) fn append_param(url: &mut Url, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        url.query_pairs_mut().append_pair(key, value);
    }
}

#[derive(Deserialize)]
struct RecordingList {
    #[serde(default)]
    recordings: Vec<Recording>,
}

#[derive(Deserialize)]
struct DateList {
    #[serde(default)]
    dates: Vec<String>,
}

#[derive(Deserialize)]
struct HourList {
    #[serde(default)]
    hours: Vec<String>,
}

impl CamviewApi {
    /// `GET recordings`
    pub async fn list_recordings(
        &self,
        filter: &RecordingFilter,
    ) -> Result<Vec<Recording>, ApiError> {
        let mut url = self.client.endpoint("recordings")?;
        filter.apply(&mut url);
        let list: RecordingList = self.client.get_json(url).await?;
        Ok(list.recordings)
    }

    /// `GET api/recordings/dates`
    pub async fn list_recording_dates(
        &self,
        camera_id: Option<&str>,
    ) -> Result<Vec<String>, ApiError> {
        let mut url = self.client.endpoint("api/recordings/dates")?;
        append_param(&mut url, "camera_id", camera_id);
        let list: DateList = self.client.get_json(url).await?;
        Ok(list.dates)
    }

    /// `GET api/recordings/hours`
    pub async fn list_recording_hours(
        &self,
        camera_id: Option<&str>,
        date: &str,
    ) -> Result<Vec<String>, ApiError> {
        if date.is_empty() {
            return Err(ApiError::validation("a date is required to list hours"));
        }

        let mut url = self.client.endpoint("api/recordings/hours")?;
        append_param(&mut url, "camera_id", camera_id);
        url.query_pairs_mut().append_pair("date", date);
        let list: HourList = self.client.get_json(url).await?;
        Ok(list.hours)
    }

    /// Playback and download URL of a recording.
    pub fn playback_url(&self, recording: &Recording) -> Result<Url, ApiError> {
        if !recording.is_playable() {
            return Err(ApiError::validation(format!(
                "recording '{}' has no path",
                recording.filename
            )));
        }

        self.client.endpoint_with_segments(
            "recordings/",
            recording.path.split('/').filter(|s| !s.is_empty()),
        )
    }
}
