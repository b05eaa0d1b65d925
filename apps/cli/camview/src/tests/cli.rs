// Unit tests for argument parsing

use crate::cli::{Cli, Command, DetectionCommand, UsersCommand, parse_role};

use camview_core::auth::RoleLevel;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// **VALUE**: Catches clap definition mistakes (duplicate flags, bad defaults)
/// that only show up at runtime.
#[test]
fn given_cli_definition_when_debug_asserted_then_is_consistent() {
    Cli::command().debug_assert();
}

/// **VALUE**: Verifies that global options parse after the subcommand.
///
/// **WHY THIS MATTERS**: `camview watch cam1 --out frames` is the natural way to
/// type it; a non-global `--out` would reject that.
///
/// **BUG THIS CATCHES**: Would catch if `global = true` is dropped from an option.
#[test]
fn given_global_options_after_subcommand_when_parsed_then_applied() {
    // GIVEN/WHEN
    let cli = Cli::try_parse_from([
        "camview",
        "watch",
        "cam1",
        "cam2",
        "--limit",
        "10",
        "--out",
        "frames",
        "--config-dir",
        "/tmp/camview",
    ])
    .expect("should parse");

    // THEN
    assert_eq!(cli.out, PathBuf::from("frames"));
    assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/camview")));
    let Command::Watch(args) = cli.command else {
        panic!("expected watch");
    };
    assert_eq!(args.cameras, vec!["cam1", "cam2"]);
    assert_eq!(args.limit, Some(10));
}

/// **VALUE**: Verifies the defaults of list commands.
#[test]
fn given_recordings_without_flags_when_parsed_then_first_page_in_cwd() {
    // GIVEN/WHEN
    let cli = Cli::try_parse_from(["camview", "recordings"]).expect("should parse");

    // THEN
    assert_eq!(cli.out, PathBuf::from("."));
    let Command::Recordings(args) = cli.command else {
        panic!("expected recordings");
    };
    assert_eq!(args.page, 1);
    assert!(!args.dates && !args.hours);
}

/// **VALUE**: Verifies that `--hours` cannot be asked for without a date.
///
/// **BUG THIS CATCHES**: Would catch if the `requires = "date"` constraint is
/// dropped, leaving the error to a backend round trip.
#[test]
fn given_hours_without_date_when_parsed_then_rejected() {
    let result = Cli::try_parse_from(["camview", "recordings", "--hours"]);
    assert!(result.is_err());
}

/// **VALUE**: Verifies `--type` maps onto the clothing type filter.
#[test]
fn given_search_type_flag_when_parsed_then_sets_clothing_type() {
    // GIVEN/WHEN
    let cli = Cli::try_parse_from([
        "camview",
        "search",
        "--type",
        "shirt",
        "--color",
        "red",
        "--confidence",
        "0.7",
    ])
    .expect("should parse");

    // THEN
    let Command::Search(args) = cli.command else {
        panic!("expected search");
    };
    assert_eq!(args.clothing_type.as_deref(), Some("shirt"));
    assert_eq!(args.color.as_deref(), Some("red"));
    assert_eq!(args.confidence, Some(0.7));
}

/// **VALUE**: Verifies nested subcommands for detection and users.
#[test]
fn given_nested_subcommands_when_parsed_then_variants_match() {
    // GIVEN/WHEN
    let detection = Cli::try_parse_from(["camview", "detection", "disable", "cam3"])
        .expect("should parse");
    let users = Cli::try_parse_from([
        "camview", "users", "set", "7", "alice", "--role", "operator",
    ])
    .expect("should parse");

    // THEN
    assert!(matches!(
        detection.command,
        Command::Detection(DetectionCommand::Disable { ref camera }) if camera == "cam3"
    ));
    let Command::Users(UsersCommand::Set {
        id,
        username,
        password,
        role,
    }) = users.command
    else {
        panic!("expected users set");
    };
    assert_eq!(id, 7);
    assert_eq!(username, "alice");
    assert_eq!(password, None);
    assert_eq!(role, RoleLevel::OPERATOR);
}

/// **VALUE**: Verifies that roles parse by number or by name.
///
/// **BUG THIS CATCHES**: Would catch an out-of-range level like `9` being
/// accepted and sent to the backend.
#[test]
fn given_role_values_when_parsed_then_known_roles_only() {
    assert_eq!(parse_role("1"), Ok(RoleLevel::VIEWER));
    assert_eq!(parse_role("Operator"), Ok(RoleLevel::OPERATOR));
    assert_eq!(parse_role(" admin "), Ok(RoleLevel::ADMIN));
    assert_eq!(parse_role("3"), Ok(RoleLevel::ADMIN));
    assert!(parse_role("9").is_err());
    assert!(parse_role("root").is_err());
}
