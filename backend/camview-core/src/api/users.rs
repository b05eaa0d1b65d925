//! User administration.

use crate::api::CamviewApi;
use crate::auth::{RoleLevel, User};
use crate::error::ApiError;

use reqwest::Method;
use serde::Serialize;

/// Body of `POST api/auth/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: RoleLevel,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: RoleLevel) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() {
            return Err(ApiError::validation("username is required"));
        }
        if self.password.trim().is_empty() {
            return Err(ApiError::validation("password is required for new users"));
        }
        Ok(())
    }
}

/// Body of `PUT api/auth/users/<id>`. A blank password leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub username: String,
    #[serde(skip_serializing_if = "is_blank")]
    pub password: Option<String>,
    pub role: RoleLevel,
}

fn is_blank(password: &Option<String>) -> bool {
    password.as_deref().is_none_or(|p| p.trim().is_empty())
}

impl UserUpdate {
    pub fn new(username: impl Into<String>, role: RoleLevel) -> Self {
        Self {
            username: username.into(),
            password: None,
            role,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() {
            return Err(ApiError::validation("username is required"));
        }
        Ok(())
    }
}

impl CamviewApi {
    /// `GET api/auth/users`
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.client.endpoint("api/auth/users")?;
        self.client.get_json(url).await
    }

    /// `POST api/auth/users`
    pub async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        user.validate()?;
        let url = self.client.endpoint("api/auth/users")?;
        self.client.send(Method::POST, url, user).await
    }

    /// `PUT api/auth/users/<id>`
    pub async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<(), ApiError> {
        update.validate()?;
        let url = self.user_url(id)?;
        self.client.send(Method::PUT, url, update).await
    }

    /// `DELETE api/auth/users/<id>`
    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let url = self.user_url(id)?;
        self.client.delete(url).await
    }

    fn user_url(&self, id: u64) -> Result<url::Url, ApiError> {
        let id = id.to_string();
        self.client
            .endpoint_with_segments("api/auth/users/", [id.as_str()])
    }
}
