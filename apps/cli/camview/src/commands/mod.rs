//! One function per subcommand.
//!
//! Every command checks its tab through the shell first, so a command is
//! refused for exactly the roles the browser shell hides the tab from.
//! Commands write their report to `out` and leave logging to the logger.

pub mod admin;
pub mod live;
pub mod recordings;
pub mod search;
pub mod session;
pub mod settings;

use crate::cli::{Command, DetectionCommand};
use crate::context::AppContext;
use crate::error::CamviewError;

use std::io::Write;
use std::path::Path;

pub async fn run(
    command: Command,
    ctx: &mut AppContext,
    frames_dir: &Path,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    let shell = &mut ctx.shell;

    match command {
        Command::Login { username, password } => {
            session::login(shell, &username, &password, out).await
        }
        Command::Logout => session::logout(shell, out).await,
        Command::Whoami => session::whoami(shell, out),
        Command::Cameras => live::cameras(shell, out).await,
        Command::Watch(args) => live::watch(shell, &args, frames_dir, out).await,
        Command::Recordings(args) => {
            recordings::recordings(shell, &args, ctx.config.ui.page_size, out).await
        }
        Command::Search(args) => search::search(shell, &args, &ctx.config.ui, out).await,
        Command::Timeline { path } => search::timeline(shell, &path, out).await,
        Command::Stats => admin::stats(shell, out).await,
        Command::Detection(DetectionCommand::Status { camera }) => {
            admin::camera_detection(shell, &camera, out).await
        }
        Command::Detection(DetectionCommand::Enable { camera }) => {
            admin::set_camera_detection(shell, &camera, true, out).await
        }
        Command::Detection(DetectionCommand::Disable { camera }) => {
            admin::set_camera_detection(shell, &camera, false, out).await
        }
        Command::Detection(DetectionCommand::Configure {
            enabled,
            interval,
            min_confidence,
        }) => admin::configure(shell, enabled, interval, min_confidence, out).await,
        Command::Users(command) => admin::users(shell, command, out).await,
        Command::Config(command) => {
            settings::config(&mut ctx.config, &ctx.paths, command, out)
        }
    }
}
