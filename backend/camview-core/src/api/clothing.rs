//! Clothing-attribute search over recorded detections.

use crate::api::CamviewApi;
use crate::api::recordings::append_param;
use crate::error::ApiError;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimum detection confidence used when the caller picks none.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClothingType {
    pub id: String,
    pub name: String,
}

/// Filter values the backend can search on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawClothingOptions")]
pub struct ClothingOptions {
    pub clothing_types: Vec<ClothingType>,
    pub colors: Vec<String>,
}

#[derive(Deserialize)]
struct RawClothingOptions {
    #[serde(default)]
    clothing_types: BTreeMap<String, String>,
    #[serde(default)]
    colors: Vec<String>,
}

impl From<RawClothingOptions> for ClothingOptions {
    fn from(raw: RawClothingOptions) -> Self {
        Self {
            clothing_types: raw
                .clothing_types
                .into_iter()
                .map(|(id, name)| ClothingType { id, name })
                .collect(),
            colors: raw.colors,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClothingQuery {
    pub camera_id: Option<String>,
    pub clothing_type: Option<String>,
    pub color: Option<String>,
    pub confidence: f64,
}

impl Default for ClothingQuery {
    fn default() -> Self {
        Self {
            camera_id: None,
            clothing_type: None,
            color: None,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl ClothingQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ApiError::validation(format!(
                "confidence must be between 0 and 1, got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// One detection as returned by `api/clothing/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub video_path: String,
    #[serde(default)]
    pub confidence: f64,
    /// Remaining backend fields, passed through untouched.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Detections of a single video, as listed in search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoGroup {
    pub camera_id: String,
    pub path: String,
    pub date: String,
    pub hour: String,
    pub filename: String,
    pub detections_count: usize,
    pub max_confidence: f64,
    pub detections: Vec<Detection>,
}

impl VideoGroup {
    fn new(path: &str) -> Self {
        // cam/date/hour/file
        let mut parts = path.split('/');
        let mut next = || parts.next().unwrap_or_default().to_string();
        Self {
            camera_id: next(),
            date: next(),
            hour: next(),
            filename: next(),
            path: path.to_string(),
            detections_count: 0,
            max_confidence: 0.0,
            detections: Vec::new(),
        }
    }
}

/// Group detections by video, most detections first.
///
/// Groups with equal counts keep the order in which their first detection
/// appeared.
pub fn group_by_video(detections: Vec<Detection>) -> Vec<VideoGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<VideoGroup> = Vec::new();

    for detection in detections {
        let slot = *index
            .entry(detection.video_path.clone())
            .or_insert_with(|| {
                groups.push(VideoGroup::new(&detection.video_path));
                groups.len() - 1
            });

        let group = &mut groups[slot];
        group.detections_count += 1;
        if detection.confidence > group.max_confidence {
            group.max_confidence = detection.confidence;
        }
        group.detections.push(detection);
    }

    groups.sort_by(|a, b| b.detections_count.cmp(&a.detections_count));
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerItem {
    #[serde(rename = "type")]
    pub clothing_type: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub count: u64,
}

/// Detections clustered at one point of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMarker {
    /// Seconds from the start of the video.
    pub time: f64,
    #[serde(default)]
    pub summary: Vec<MarkerItem>,
}

impl TimelineMarker {
    /// `MM:SS`
    pub fn display_time(&self) -> String {
        let total = if self.time.is_finite() && self.time > 0.0 {
            self.time as u64
        } else {
            0
        };
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    /// Type of the first summary entry, which colours the marker.
    pub fn primary_type(&self) -> &str {
        self.summary
            .first()
            .map(|item| item.clothing_type.as_str())
            .unwrap_or("unknown")
    }
}

#[derive(Deserialize)]
struct SearchResults {
    #[serde(default)]
    results: Vec<Detection>,
}

#[derive(Deserialize)]
struct Timeline {
    #[serde(default)]
    timeline: Vec<TimelineMarker>,
}

impl CamviewApi {
    /// `GET api/clothing/available`
    pub async fn clothing_options(&self) -> Result<ClothingOptions, ApiError> {
        let url = self.client.endpoint("api/clothing/available")?;
        self.client.get_json(url).await
    }

    /// `GET api/clothing/search`, returning the raw detections.
    pub async fn search_clothing(&self, query: &ClothingQuery) -> Result<Vec<Detection>, ApiError> {
        query.validate()?;

        let mut url = self.client.endpoint("api/clothing/search")?;
        append_param(&mut url, "camera_id", query.camera_id.as_deref());
        append_param(&mut url, "clothing_type", query.clothing_type.as_deref());
        append_param(&mut url, "color", query.color.as_deref());
        url.query_pairs_mut()
            .append_pair("confidence", &query.confidence.to_string());

        let found: SearchResults = self.client.get_json(url).await?;
        Ok(found.results)
    }

    /// Search and group the hits by video.
    pub async fn search_clothing_by_video(
        &self,
        query: &ClothingQuery,
    ) -> Result<Vec<VideoGroup>, ApiError> {
        Ok(group_by_video(self.search_clothing(query).await?))
    }

    /// `GET api/clothing/video/<path>/timeline`; the path travels as one
    /// encoded segment.
    pub async fn video_timeline(&self, video_path: &str) -> Result<Vec<TimelineMarker>, ApiError> {
        if video_path.is_empty() {
            return Err(ApiError::validation("video path is empty"));
        }

        let url = self
            .client
            .endpoint_with_segments("api/clothing/video/", [video_path, "timeline"])?;
        let timeline: Timeline = self.client.get_json(url).await?;
        Ok(timeline.timeline)
    }
}
