use crate::support::{config_dir, output, start};

use camview::cli::{Command, ConfigCommand};
use camview::commands;
use camview::error::CamviewError;

use camview_core::config::AppConfig;

use wiremock::MockServer;

fn set(max_cameras: Option<usize>, page_size: Option<usize>) -> Command {
    Command::Config(ConfigCommand::Set {
        base_url: None,
        request_timeout_secs: None,
        max_cameras,
        page_size,
        default_confidence: None,
    })
}

/// **VALUE**: Verifies `config set` persists only the given values.
///
/// **WHY THIS MATTERS**: The CLI is the only place to edit settings without
/// opening the JSON by hand; losing the base URL on a page-size change would
/// point the client at localhost.
///
/// **BUG THIS CATCHES**: Would catch saving defaults over the loaded file.
#[tokio::test]
async fn given_existing_config_when_setting_page_size_then_other_values_kept() {
    // GIVEN: A config pointing at the mock with page size 12
    let server = MockServer::start().await;
    let dir = config_dir(&server, 12, None);
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN
    commands::run(set(None, Some(5)), &mut ctx, dir.path(), &mut out)
        .await
        .expect("config set should succeed");

    // THEN: File and printed config agree
    let saved = AppConfig::load(dir.path()).unwrap();
    assert_eq!(saved.ui.page_size, 5);
    assert_eq!(saved.server.base_url, format!("{}/", server.uri()));
    assert!(output(out).contains(r#""page_size": 5"#));
}

/// **VALUE**: Verifies an invalid value is refused and the file left alone.
///
/// **BUG THIS CATCHES**: Would catch validation happening after the write.
#[tokio::test]
async fn given_five_cameras_when_setting_then_rejected_and_file_unchanged() {
    // GIVEN
    let server = MockServer::start().await;
    let dir = config_dir(&server, 12, None);
    let before = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    let mut ctx = start(&dir).await;

    // WHEN
    let err = commands::run(set(Some(5), None), &mut ctx, dir.path(), &mut Vec::new())
        .await
        .unwrap_err();

    // THEN
    assert!(matches!(err, CamviewError::Core { .. }));
    assert!(err.to_string().contains("max_cameras"), "got {err}");
    let after = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert_eq!(before, after);
}
