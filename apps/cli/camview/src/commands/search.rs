use crate::cli::SearchArgs;
use crate::commands::recordings::write_page_footer;
use crate::error::CamviewError;

use camview_core::api::{ClothingQuery, paginate};
use camview_core::config::UiPreferences;
use camview_core::live::FrameConnector;
use camview_core::shell::{Tab, ViewShell};

use std::io::Write;

pub async fn search<C: FrameConnector>(
    shell: &ViewShell<C>,
    args: &SearchArgs,
    ui: &UiPreferences,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::ClothingSearch)?;
    let api = shell.api()?;

    if args.options {
        let options = api.clothing_options().await?;
        writeln!(out, "Types:")?;
        for clothing_type in &options.clothing_types {
            writeln!(out, "  {}\t{}", clothing_type.id, clothing_type.name)?;
        }
        writeln!(out, "Colors: {}", options.colors.join(", "))?;
        return Ok(());
    }

    let query = ClothingQuery {
        camera_id: args.camera.clone(),
        clothing_type: args.clothing_type.clone(),
        color: args.color.clone(),
        confidence: args
            .confidence
            .unwrap_or_else(|| f64::from(ui.default_confidence)),
    };

    let groups = api.search_clothing_by_video(&query).await?;
    if groups.is_empty() {
        writeln!(out, "No detections")?;
        return Ok(());
    }

    let page = paginate(&groups, args.page, ui.page_size);
    for group in page.items {
        writeln!(
            out,
            "{}\t{} detections\tmax {:.0}%",
            group.path,
            group.detections_count,
            group.max_confidence * 100.0
        )?;
    }
    write_page_footer(out, &page)
}

pub async fn timeline<C: FrameConnector>(
    shell: &ViewShell<C>,
    path: &str,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::ClothingSearch)?;
    let markers = shell.api()?.video_timeline(path).await?;

    if markers.is_empty() {
        writeln!(out, "No detections in {path}")?;
    }
    for marker in &markers {
        let items: Vec<String> = marker
            .summary
            .iter()
            .map(|item| format!("{} {} x{}", item.color, item.clothing_type, item.count))
            .collect();
        writeln!(out, "{}\t{}", marker.display_time(), items.join(", "))?;
    }
    Ok(())
}
