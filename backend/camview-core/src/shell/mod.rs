//! Tab navigation and the live grid.
//!
//! [`ViewShell`] owns the [`SessionManager`] and every open
//! [`LiveFrameChannel`]. Tabs are gated through the route guard; the live grid
//! is capped at the configured number of cameras (at most
//! [`MAX_LIVE_CAMERAS`]).

mod layout;
mod tab;

pub use layout::{GRID_COLUMNS, grid_spans};
pub use tab::Tab;

use crate::MAX_LIVE_CAMERAS;
use crate::api::{Camera, CamviewApi};
use crate::auth::{Session, SessionManager};
use crate::error::{AuthError, CoreError, ShellError, StorageError};
use crate::guard::{GuardDecision, Route};
use crate::live::{FrameConnector, LiveFrameChannel};

use std::sync::Arc;

use log::{debug, info};

pub struct ViewShell<C: FrameConnector> {
    session: SessionManager,
    connector: Arc<C>,
    max_cameras: usize,
    cameras: Vec<Camera>,
    channels: Vec<LiveFrameChannel<C>>,
    active_tab: Tab,
}

impl<C: FrameConnector> ViewShell<C> {
    /// `max_cameras` is clamped to `1..=MAX_LIVE_CAMERAS`.
    pub fn new(session: SessionManager, connector: Arc<C>, max_cameras: usize) -> Self {
        Self {
            session,
            connector,
            max_cameras: max_cameras.clamp(1, MAX_LIVE_CAMERAS),
            cameras: Vec::new(),
            channels: Vec::new(),
            active_tab: Tab::Live,
        }
    }

    /// Restore any persisted session and report where the user lands.
    pub async fn init(&mut self) -> GuardDecision {
        self.session.init().await;
        self.session.guard(None)
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.session()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.session.login(username, password).await?;
        self.active_tab = Tab::Live;
        Ok(session)
    }

    /// Close every channel and end the session.
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.close_channels().await;
        self.active_tab = Tab::Live;
        self.session.logout()
    }

    /// Lifecycle end. Same as [`logout`](Self::logout).
    pub async fn teardown(&mut self) -> Result<(), StorageError> {
        self.close_channels().await;
        self.session.teardown()
    }

    /// Feature-view calls, available once authenticated.
    pub fn api(&self) -> Result<CamviewApi, ShellError> {
        if !self.session.is_authenticated() {
            return Err(ShellError::not_authenticated());
        }
        Ok(CamviewApi::new(self.session.auth_client()))
    }

    // Tabs

    /// Tabs the current session may open, in display order.
    pub fn visible_tabs(&self) -> Vec<Tab> {
        Tab::ALL
            .into_iter()
            .filter(|tab| self.session.guard(Some(tab.required_role())) == GuardDecision::Allow)
            .collect()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Switch to `tab` if the guard allows it; the active tab is unchanged
    /// otherwise.
    pub fn open_tab(&mut self, tab: Tab) -> GuardDecision {
        let decision = self.session.guard(Some(tab.required_role()));
        if decision == GuardDecision::Allow {
            debug!("Opening tab {tab}");
            self.active_tab = tab;
        }
        decision
    }

    /// [`open_tab`](Self::open_tab)'s decision as an error.
    pub fn require(&self, tab: Tab) -> Result<(), ShellError> {
        match self.session.guard(Some(tab.required_role())) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Redirect(Route::Unauthorized) => Err(ShellError::unauthorized(tab)),
            GuardDecision::Pending | GuardDecision::Redirect(Route::Login) => {
                Err(ShellError::not_authenticated())
            }
        }
    }

    // Live grid

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn max_cameras(&self) -> usize {
        self.max_cameras
    }

    /// Fetch the camera list from the backend and apply it.
    pub async fn refresh_cameras(&mut self) -> Result<&[Camera], CoreError> {
        self.require(Tab::Live)?;
        let cameras = self.api()?.list_cameras().await?;
        self.set_cameras(cameras).await?;
        Ok(&self.cameras)
    }

    /// Replace the camera list.
    ///
    /// Channels of cameras that disappeared are closed. When nothing is being
    /// viewed, the first camera is opened.
    pub async fn set_cameras(&mut self, cameras: Vec<Camera>) -> Result<(), ShellError> {
        self.cameras = cameras;

        let mut kept = Vec::with_capacity(self.channels.len());
        for mut channel in self.channels.drain(..) {
            if self.cameras.iter().any(|c| c.id == channel.camera_id()) {
                kept.push(channel);
            } else {
                info!("Camera {} is gone, closing its stream", channel.camera_id());
                channel.close().await;
            }
        }
        self.channels = kept;

        if self.channels.is_empty()
            && let Some(first) = self.cameras.first()
        {
            let id = first.id.clone();
            self.add_camera(&id)?;
        }
        Ok(())
    }

    /// Cameras that can still be added to the grid.
    pub fn available_cameras(&self) -> Vec<&Camera> {
        self.cameras
            .iter()
            .filter(|c| !self.is_viewing(&c.id))
            .collect()
    }

    pub fn is_viewing(&self, camera_id: &str) -> bool {
        self.channels.iter().any(|ch| ch.camera_id() == camera_id)
    }

    pub fn can_add_camera(&self) -> bool {
        self.channels.len() < self.max_cameras && !self.available_cameras().is_empty()
    }

    /// Start viewing `camera_id`.
    ///
    /// # Errors
    ///
    /// [`ShellError::CameraLimit`] when the grid is full; no channel is opened.
    pub fn add_camera(&mut self, camera_id: &str) -> Result<&LiveFrameChannel<C>, ShellError> {
        self.require(Tab::Live)?;

        if self.channels.len() >= self.max_cameras {
            return Err(ShellError::camera_limit(self.max_cameras));
        }
        if self.is_viewing(camera_id) {
            return Err(ShellError::already_viewing(camera_id));
        }
        let Some(camera) = self.cameras.iter().find(|c| c.id == camera_id) else {
            return Err(ShellError::unknown_camera(camera_id));
        };

        info!("Viewing camera {} ({})", camera.id, camera.display_name());
        let channel = LiveFrameChannel::open(camera.clone(), Arc::clone(&self.connector));
        self.channels.push(channel);

        let index = self.channels.len() - 1;
        Ok(&self.channels[index])
    }

    /// Stop viewing `camera_id`. Returns whether it was being viewed.
    pub async fn remove_camera(&mut self, camera_id: &str) -> bool {
        let Some(index) = self.channels.iter().position(|ch| ch.camera_id() == camera_id) else {
            return false;
        };
        let mut channel = self.channels.remove(index);
        channel.close().await;
        true
    }

    pub async fn reconnect(&mut self, camera_id: &str) -> Result<(), ShellError> {
        let Some(channel) = self.channel_mut(camera_id) else {
            return Err(ShellError::unknown_camera(camera_id));
        };
        channel.reconnect().await;
        Ok(())
    }

    pub fn channels(&self) -> &[LiveFrameChannel<C>] {
        &self.channels
    }

    pub fn channel(&self, camera_id: &str) -> Option<&LiveFrameChannel<C>> {
        self.channels.iter().find(|ch| ch.camera_id() == camera_id)
    }

    fn channel_mut(&mut self, camera_id: &str) -> Option<&mut LiveFrameChannel<C>> {
        self.channels
            .iter_mut()
            .find(|ch| ch.camera_id() == camera_id)
    }

    /// Column spans of the current grid.
    pub fn layout(&self) -> Vec<u8> {
        grid_spans(self.channels.len())
    }

    /// Close every live channel; the session is untouched.
    pub async fn close_channels(&mut self) {
        for mut channel in self.channels.drain(..) {
            channel.close().await;
        }
    }
}
