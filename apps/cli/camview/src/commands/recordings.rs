use crate::cli::RecordingsArgs;
use crate::error::CamviewError;

use camview_core::api::{Page, RecordingFilter, paginate};
use camview_core::live::FrameConnector;
use camview_core::shell::{Tab, ViewShell};

use std::io::Write;

pub async fn recordings<C: FrameConnector>(
    shell: &ViewShell<C>,
    args: &RecordingsArgs,
    page_size: usize,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    shell.require(Tab::Recordings)?;
    let api = shell.api()?;
    let camera = args.camera.as_deref();

    if args.dates {
        let dates = api.list_recording_dates(camera).await?;
        return write_list(out, "No recording dates", &dates);
    }

    if args.hours {
        let date = args.date.as_deref().unwrap_or_default();
        let hours = api.list_recording_hours(camera, date).await?;
        return write_list(out, "No recording hours", &hours);
    }

    let mut filter = RecordingFilter::default();
    if let Some(camera) = &args.camera {
        filter = filter.camera(camera);
    }
    if let Some(date) = &args.date {
        filter = filter.date(date);
    }
    if let Some(hour) = &args.hour {
        filter = filter.hour(hour);
    }

    let recordings = api.list_recordings(&filter).await?;
    if recordings.is_empty() {
        writeln!(out, "No recordings")?;
        return Ok(());
    }

    let page = paginate(&recordings, args.page, page_size);
    for recording in page.items {
        let url = match api.playback_url(recording) {
            Ok(url) => url.to_string(),
            Err(_) => "-".to_string(),
        };
        writeln!(
            out,
            "{}\t{} {}\t{}\t{:.2} MB\t{}",
            recording.camera_id,
            recording.date,
            recording.display_time(),
            recording.filename,
            recording.size_mb,
            url
        )?;
    }
    write_page_footer(out, &page)
}

fn write_list(out: &mut impl Write, empty: &str, values: &[String]) -> Result<(), CamviewError> {
    if values.is_empty() {
        writeln!(out, "{empty}")?;
    }
    for value in values {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

/// `Page 2/5 (53 total)`, with a hint when more pages follow.
pub(crate) fn write_page_footer<T>(
    out: &mut impl Write,
    page: &Page<'_, T>,
) -> Result<(), CamviewError> {
    write!(
        out,
        "Page {}/{} ({} total)",
        page.number,
        page.page_count.max(1),
        page.total
    )?;
    if page.has_next() {
        write!(out, ", next: --page {}", page.number + 1)?;
    }
    writeln!(out)?;
    Ok(())
}
