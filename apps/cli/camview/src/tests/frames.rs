// Unit tests for frame file naming

use crate::commands::live::frame_path;

use std::path::Path;

/// **VALUE**: Verifies that camera ids become safe file names.
///
/// **WHY THIS MATTERS**: Camera ids come from the backend. An id like `../x`
/// must not write outside the output directory.
///
/// **BUG THIS CATCHES**: Would catch if the id were joined onto the directory
/// unchanged.
#[test]
fn given_camera_ids_when_building_frame_path_then_stays_in_directory() {
    let dir = Path::new("/frames");

    assert_eq!(frame_path(dir, "cam-1_a"), Path::new("/frames/cam-1_a.jpg"));

    for id in ["../etc", "lobby cam/2"] {
        let path = frame_path(dir, id);
        assert_eq!(path.parent(), Some(dir), "{id} escaped to {}", path.display());
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(
            name.chars().all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c)),
            "unsafe name {name}"
        );
    }
    let name = frame_path(dir, "../etc");
    let name = name.file_name().and_then(|n| n.to_str()).unwrap();
    assert!(name.starts_with("___etc-") && name.ends_with(".jpg"), "got {name}");
}

/// **VALUE**: Verifies ids that clean up to the same name still get their own
/// frame files.
///
/// **BUG THIS CATCHES**: Would catch `cam.1` and `cam_1` both writing
/// `cam_1.jpg`, so one camera overwrites the other's frames.
#[test]
fn given_ids_differing_only_in_unsafe_chars_when_building_frame_path_then_paths_differ() {
    let dir = Path::new("/frames");

    let plain = frame_path(dir, "cam_1");
    let dotted = frame_path(dir, "cam.1");
    let spaced = frame_path(dir, "cam 1");

    assert_eq!(plain, Path::new("/frames/cam_1.jpg"));
    assert_ne!(dotted, plain);
    assert_ne!(spaced, plain);
    assert_ne!(dotted, spaced);
    assert_eq!(frame_path(dir, "cam.1"), dotted, "names must be stable");
}
