//! Typed calls behind the feature views.
//!
//! Every call goes through [`AuthClient::auth_fetch`], so none of them is ever
//! sent without a bearer token. The calls are stateless; loading and error
//! presentation belong to the caller.

mod cameras;
mod clothing;
mod detection;
mod pagination;
mod recordings;
mod users;

pub use cameras::Camera;
pub use clothing::{
    ClothingOptions, ClothingQuery, ClothingType, DEFAULT_CONFIDENCE, Detection, MarkerItem,
    TimelineMarker, VideoGroup, group_by_video,
};
pub use detection::{
    CameraDetection, CameraStatus, DatabaseStats, DetectionConfig, ServiceStats, ServiceStatus,
};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, paginate};
pub use recordings::{Recording, RecordingFilter};
pub use users::{NewUser, UserUpdate};

use crate::auth::client::AuthClient;

/// Feature-view calls over an authenticated client.
#[derive(Clone)]
pub struct CamviewApi {
    client: AuthClient,
}

impl CamviewApi {
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }
}
