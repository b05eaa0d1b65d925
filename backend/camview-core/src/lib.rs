pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod live;
pub mod paths;
pub mod shell;

#[cfg(test)]
mod tests;

pub const DEFAULT_SERVER_HOST: &str = "localhost:8000";
pub const DEFAULT_SERVER_BASE_URL: &str =
    const_format::concatcp!("http://", DEFAULT_SERVER_HOST, "/");

/// Cameras the live grid shows at once.
pub const MAX_LIVE_CAMERAS: usize = 4;
