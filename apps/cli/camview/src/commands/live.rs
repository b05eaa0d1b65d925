use crate::cli::WatchArgs;
use crate::error::CamviewError;

use camview_core::live::{ChannelSnapshot, ChannelState, Frame, FrameConnector};
use camview_core::shell::{Tab, ViewShell};

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use uuid::Uuid;

/// How often `watch` samples its channels.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

const FRAME_EXTENSION: &str = "jpg";

pub async fn cameras<C: FrameConnector>(
    shell: &ViewShell<C>,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Live)?;
    let cameras = shell.api()?.list_cameras().await?;

    if cameras.is_empty() {
        writeln!(out, "No cameras")?;
    }
    for camera in &cameras {
        writeln!(out, "{}\t{}", camera.id, camera.display_name())?;
    }
    Ok(())
}

/// Stream the chosen cameras, keeping `<frames_dir>/<camera>.jpg` at the
/// latest frame.
///
/// Stops on Ctrl-C, or once every camera is done: it reached `--limit`
/// frames or its stream ended. Channels are closed on every exit path.
pub async fn watch<C: FrameConnector>(
    shell: &mut ViewShell<C>,
    args: &WatchArgs,
    frames_dir: &Path,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    let result = watch_channels(shell, args, frames_dir, out).await;
    shell.close_channels().await;
    result
}

async fn watch_channels<C: FrameConnector>(
    shell: &mut ViewShell<C>,
    args: &WatchArgs,
    frames_dir: &Path,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Live)?;
    std::fs::create_dir_all(frames_dir)?;

    // Loading the list opens the first camera
    shell.refresh_cameras().await?;
    if !args.cameras.is_empty() {
        select_cameras(shell, &args.cameras).await?;
    }

    if shell.channels().is_empty() {
        writeln!(out, "No cameras to watch")?;
        return Ok(());
    }

    let watched: Vec<&str> = shell.channels().iter().map(|ch| ch.camera_id()).collect();
    writeln!(
        out,
        "Watching {} (grid {:?}), frames in {}",
        watched.join(", "),
        shell.layout(),
        frames_dir.display()
    )?;

    let mut seen: HashMap<String, Seen> = HashMap::new();
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted, closing streams");
                break;
            }
            _ = ticker.tick() => {}
        }

        // Stop decisions use the same snapshots that were written out, so a
        // frame stored just before a close is never skipped.
        let snapshots: Vec<ChannelSnapshot> =
            shell.channels().iter().map(|ch| ch.snapshot()).collect();
        for snapshot in &snapshots {
            let entry = seen.entry(snapshot.camera_id.clone()).or_default();
            report(entry, snapshot, frames_dir, out)?;
        }

        if snapshots.iter().all(|snapshot| ended(snapshot.state)) {
            writeln!(out, "All streams ended")?;
            break;
        }

        if let Some(limit) = args.limit
            && snapshots
                .iter()
                .all(|snapshot| snapshot.frames_received >= limit || ended(snapshot.state))
        {
            debug!("Frame limit {limit} reached on every live stream");
            break;
        }
    }

    for channel in shell.channels() {
        writeln!(
            out,
            "{}: {} frames",
            channel.camera_id(),
            channel.frames_received()
        )?;
    }
    Ok(())
}

/// Make the grid show exactly `wanted`, in order.
async fn select_cameras<C: FrameConnector>(
    shell: &mut ViewShell<C>,
    wanted: &[String],
) -> Result<(), CamviewError> {
    let unwanted: Vec<String> = shell
        .channels()
        .iter()
        .map(|ch| ch.camera_id().to_string())
        .filter(|id| !wanted.contains(id))
        .collect();
    for id in unwanted {
        shell.remove_camera(&id).await;
    }

    for id in wanted {
        if !shell.is_viewing(id) {
            shell.add_camera(id)?;
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Seen {
    state: Option<ChannelState>,
    sequence: Option<u64>,
}

fn report(
    seen: &mut Seen,
    snapshot: &ChannelSnapshot,
    frames_dir: &Path,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    if seen.state != Some(snapshot.state) {
        match &snapshot.last_error {
            Some(error) if snapshot.state == ChannelState::Error => {
                writeln!(out, "{}: {} ({error})", snapshot.camera_id, snapshot.state)?
            }
            _ => writeln!(out, "{}: {}", snapshot.camera_id, snapshot.state.placeholder())?,
        }
        seen.state = Some(snapshot.state);
    }

    if let Some(frame) = &snapshot.frame
        && seen.sequence != Some(frame.sequence())
    {
        write_frame(frames_dir, &snapshot.camera_id, frame)?;
        seen.sequence = Some(frame.sequence());
    }
    Ok(())
}

/// No more frames will arrive without a reconnect.
fn ended(state: ChannelState) -> bool {
    matches!(state, ChannelState::Disconnected | ChannelState::Error)
}

/// `<frames_dir>/<camera>.jpg`, written through a temp file so readers never
/// see half a frame.
fn write_frame(frames_dir: &Path, camera_id: &str, frame: &Frame) -> Result<(), CamviewError> {
    let path = frame_path(frames_dir, camera_id);
    let temp_path = path.with_extension(format!("{FRAME_EXTENSION}.tmp"));

    std::fs::write(&temp_path, frame.bytes())?;
    std::fs::rename(&temp_path, &path)?;
    Ok(())
}

/// Camera ids are backend-chosen; anything outside `[A-Za-z0-9_-]` becomes `_`.
///
/// A rewritten id gets a suffix derived from the original, so `cam.1` and
/// `cam_1` never share a file.
pub fn frame_path(frames_dir: &Path, camera_id: &str) -> PathBuf {
    let mut name: String = camera_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name != camera_id {
        let digest = Uuid::new_v5(&Uuid::NAMESPACE_OID, camera_id.as_bytes()).simple().to_string();
        name.push('-');
        name.push_str(&digest[..8]);
    }
    frames_dir.join(format!("{name}.{FRAME_EXTENSION}"))
}
