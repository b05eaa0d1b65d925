use crate::api::CamviewApi;
use crate::error::ApiError;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Camera {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The name, or the id when the backend sent no name.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl CamviewApi {
    /// `GET cameras`
    pub async fn list_cameras(&self) -> Result<Vec<Camera>, ApiError> {
        let url = self.client.endpoint("cameras")?;
        self.client.get_json(url).await
    }
}
