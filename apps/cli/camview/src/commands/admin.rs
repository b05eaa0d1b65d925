//! Configuration and Users tabs; both need an administrator.

use crate::cli::UsersCommand;
use crate::error::CamviewError;

use camview_core::api::{NewUser, UserUpdate};
use camview_core::live::FrameConnector;
use camview_core::shell::{Tab, ViewShell};

use std::io::Write;

use log::info;

/// Colours and types listed by `stats`.
const TOP_ENTRIES: usize = 5;

pub async fn stats<C: FrameConnector>(
    shell: &ViewShell<C>,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Configuration)?;
    let stats = shell.api()?.service_stats().await?;
    let service = &stats.service;
    let database = &stats.database;

    writeln!(
        out,
        "Detection: {}, every {}s, min confidence {:.0}%",
        if service.enabled { "on" } else { "off" },
        service.detection_interval,
        service.min_confidence * 100.0
    )?;
    writeln!(out, "Total detections: {}", database.total_detections)?;
    for (label, top) in [
        ("Top colors", database.top_colors(TOP_ENTRIES)),
        ("Top types", database.top_types(TOP_ENTRIES)),
    ] {
        let entries: Vec<String> = top
            .iter()
            .map(|(name, count)| format!("{name} ({count})"))
            .collect();
        writeln!(out, "{label}: {}", entries.join(", "))?;
    }
    Ok(())
}

/// Update the service settings. Values not given keep what the backend
/// reports now.
pub async fn configure<C: FrameConnector>(
    shell: &ViewShell<C>,
    enabled: Option<bool>,
    interval: Option<f64>,
    min_confidence: Option<f64>,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Configuration)?;
    let api = shell.api()?;

    let mut config = api.service_stats().await?.config();
    if let Some(enabled) = enabled {
        config.enabled = enabled;
    }
    if let Some(interval) = interval {
        config.interval = interval;
    }
    if let Some(min_confidence) = min_confidence {
        config.min_confidence = min_confidence;
    }

    api.update_detection_config(&config).await?;
    info!("Detection config updated: {config:?}");
    writeln!(
        out,
        "Detection {}, every {}s, min confidence {:.0}%",
        if config.enabled { "on" } else { "off" },
        config.interval,
        config.min_confidence * 100.0
    )?;
    Ok(())
}

pub async fn camera_detection<C: FrameConnector>(
    shell: &ViewShell<C>,
    camera_id: &str,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Configuration)?;
    let status = shell.api()?.camera_status(camera_id).await?;
    writeln!(
        out,
        "{camera_id}: detection {}",
        if status.detection.enabled { "on" } else { "off" }
    )?;
    Ok(())
}

pub async fn set_camera_detection<C: FrameConnector>(
    shell: &ViewShell<C>,
    camera_id: &str,
    enabled: bool,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Configuration)?;
    let now_enabled = shell
        .api()?
        .set_camera_detection(camera_id, enabled)
        .await?;
    writeln!(
        out,
        "{camera_id}: detection {}",
        if now_enabled { "on" } else { "off" }
    )?;
    Ok(())
}

pub async fn users<C: FrameConnector>(
    shell: &ViewShell<C>,
    command: UsersCommand,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Users)?;
    let api = shell.api()?;

    match command {
        UsersCommand::List => {
            for user in api.list_users().await? {
                writeln!(out, "{}\t{}\t{}", user.id, user.username, user.role)?;
            }
        }
        UsersCommand::Add {
            username,
            password,
            role,
        } => {
            api.create_user(&NewUser::new(username.as_str(), password, role))
                .await?;
            writeln!(out, "Created {username}")?;
        }
        UsersCommand::Set {
            id,
            username,
            password,
            role,
        } => {
            let mut update = UserUpdate::new(username.as_str(), role);
            if let Some(password) = password {
                update = update.with_password(password);
            }
            api.update_user(id, &update).await?;
            writeln!(out, "Updated {username}")?;
        }
        UsersCommand::Delete { id } => {
            api.delete_user(id).await?;
            writeln!(out, "Deleted user {id}")?;
        }
    }
    Ok(())
}
