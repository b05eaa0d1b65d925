pub mod api;
pub mod auth;
pub mod channel;
pub mod config;
pub mod shell;
pub mod storage;

pub use api::ApiError;
pub use auth::AuthError;
pub use channel::{ChannelError, FrameError};
pub use config::ConfigError;
pub use shell::ShellError;
pub use storage::StorageError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
