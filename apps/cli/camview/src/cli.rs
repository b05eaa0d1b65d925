//! Command-line surface of the `camview` binary.

use camview_core::auth::RoleLevel;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "camview", version, about = "Terminal client for the camview surveillance backend")]
pub struct Cli {
    /// Directory holding config.json and the session token
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Where `watch` writes camera frames
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// Mirror debug logging to the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print failures as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login { username: String, password: String },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user and the tabs they can open
    Whoami,

    /// List cameras
    Cameras,

    /// Stream live frames to `<out>/<camera>.jpg` until Ctrl-C
    Watch(WatchArgs),

    /// Browse recordings
    Recordings(RecordingsArgs),

    /// Search clothing detections
    Search(SearchArgs),

    /// Detection markers of one recording
    Timeline {
        /// Recording path, e.g. `cam1/2024-01-02/14/clip.mp4`
        path: String,
    },

    /// Detection service statistics
    Stats,

    /// Detection service and per-camera settings
    #[command(subcommand)]
    Detection(DetectionCommand),

    /// User administration
    #[command(subcommand)]
    Users(UsersCommand),

    /// Show or change the local settings in config.json
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Cameras to view; the first camera when empty
    pub cameras: Vec<String>,

    /// Stop once every camera has received this many frames
    #[arg(long)]
    pub limit: Option<u64>,
}

#[derive(Debug, Args)]
pub struct RecordingsArgs {
    #[arg(long)]
    pub camera: Option<String>,

    /// `YYYY-MM-DD`
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub hour: Option<String>,

    /// List the dates that have recordings instead
    #[arg(long, conflicts_with = "hours")]
    pub dates: bool,

    /// List the hours of `--date` that have recordings instead
    #[arg(long, requires = "date")]
    pub hours: bool,

    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub camera: Option<String>,

    #[arg(long = "type", value_name = "TYPE")]
    pub clothing_type: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    /// Minimum confidence in `0..=1`; the configured default when absent
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Show the available types and colours instead
    #[arg(long)]
    pub options: bool,

    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Subcommand)]
pub enum DetectionCommand {
    /// Detection state of one camera
    Status { camera: String },

    /// Turn detection on for one camera
    Enable { camera: String },

    /// Turn detection off for one camera
    Disable { camera: String },

    /// Update the service settings; unset values keep their current value
    Configure {
        #[arg(long)]
        enabled: Option<bool>,

        /// Seconds between analysed frames
        #[arg(long)]
        interval: Option<f64>,

        #[arg(long)]
        min_confidence: Option<f64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,

    Add {
        username: String,
        password: String,
        #[arg(long, value_parser = parse_role, default_value = "1")]
        role: RoleLevel,
    },

    /// Update a user; the password is kept unless given
    Set {
        id: u64,
        username: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, value_parser = parse_role, default_value = "1")]
        role: RoleLevel,
    },

    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,

    /// Change the given values and save; the file is validated before writing
    Set {
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        request_timeout_secs: Option<u64>,

        #[arg(long)]
        max_cameras: Option<usize>,

        #[arg(long)]
        page_size: Option<usize>,

        #[arg(long)]
        default_confidence: Option<f32>,
    },
}

/// Accepts a level (`1`-`3`) or a name (`viewer`, `operator`, `admin`).
pub fn parse_role(value: &str) -> Result<RoleLevel, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "viewer" => Ok(RoleLevel::VIEWER),
        "2" | "operator" => Ok(RoleLevel::OPERATOR),
        "3" | "admin" | "administrator" => Ok(RoleLevel::ADMIN),
        other => Err(format!(
            "unknown role '{other}' (expected 1-3, viewer, operator or admin)"
        )),
    }
}
