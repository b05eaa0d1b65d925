use crate::error::FrameError;
use crate::live::{ChannelState, Frame, FrameMessage, parse_frame_message};

/// **VALUE**: Verifies both image field names decode and `i` wins.
///
/// **BUG THIS CATCHES**: Would catch support for the short `i` field being
/// dropped, which blanks every tile on current servers.
#[test]
fn given_image_fields_when_parsed_then_short_field_preferred() {
    // "aGk=" = "hi", "eW8=" = "yo"
    assert_eq!(
        parse_frame_message(r#"{"image":"aGk="}"#).unwrap(),
        FrameMessage::Image(b"hi".to_vec())
    );
    assert_eq!(
        parse_frame_message(r#"{"i":"aGk="}"#).unwrap(),
        FrameMessage::Image(b"hi".to_vec())
    );
    assert_eq!(
        parse_frame_message(r#"{"image":"eW8=","i":"aGk="}"#).unwrap(),
        FrameMessage::Image(b"hi".to_vec())
    );
    assert_eq!(
        parse_frame_message(r#"{"image":"aGk=","i":""}"#).unwrap(),
        FrameMessage::Image(b"hi".to_vec())
    );
}

#[test]
fn given_error_field_when_parsed_then_error_wins_over_image() {
    assert_eq!(
        parse_frame_message(r#"{"error":"no signal","i":"aGk="}"#).unwrap(),
        FrameMessage::Error("no signal".to_string())
    );
    assert_eq!(
        parse_frame_message(r#"{"error":{"code":5}}"#).unwrap(),
        FrameMessage::Error(r#"{"code":5}"#.to_string())
    );
}

/// **VALUE**: Verifies every malformed shape is rejected instead of guessed.
///
/// **WHY THIS MATTERS**: Frame payloads come off the network; anything outside
/// the closed message shape must be dropped, never interpreted.
#[test]
fn given_malformed_messages_when_parsed_then_rejected() {
    assert!(matches!(parse_frame_message("ready"), Err(FrameError::Parse { .. })));
    assert!(matches!(parse_frame_message("[1,2]"), Err(FrameError::Parse { .. })));
    assert!(matches!(
        parse_frame_message(r#"{"i":"aGk=","extra":1}"#),
        Err(FrameError::Parse { .. })
    ));
    assert!(matches!(parse_frame_message("{}"), Err(FrameError::Empty { .. })));
    assert!(matches!(
        parse_frame_message(r#"{"error":null,"image":""}"#),
        Err(FrameError::Empty { .. })
    ));
    assert!(matches!(
        parse_frame_message(r#"{"i":"not base64!"}"#),
        Err(FrameError::Decode { .. })
    ));
}

/// **VALUE**: Verifies falsy `error` values are ignored, including `0`.
///
/// **BUG THIS CATCHES**: Would catch `{"error":0}` being surfaced as error
/// text "0" and knocking a healthy stream into the error state.
#[test]
fn given_falsy_error_values_when_parsed_then_image_used() {
    for error in ["null", "false", "\"\"", "0", "0.0"] {
        let text = format!(r#"{{"error":{error},"i":"aGk="}}"#);
        assert_eq!(
            parse_frame_message(&text).unwrap(),
            FrameMessage::Image(b"hi".to_vec()),
            "error value {error}"
        );
    }
    assert_eq!(
        parse_frame_message(r#"{"error":7}"#).unwrap(),
        FrameMessage::Error("7".to_string())
    );
}

#[test]
fn given_frame_when_data_uri_then_jpeg_base64() {
    let frame = Frame::new(b"hi".to_vec(), 1);

    assert_eq!(frame.data_uri(), "data:image/jpeg;base64,aGk=");
}

#[test]
fn given_states_when_can_reconnect_then_false_only_while_connecting() {
    assert!(ChannelState::Disconnected.can_reconnect());
    assert!(ChannelState::Connected.can_reconnect());
    assert!(ChannelState::Error.can_reconnect());
    assert!(!ChannelState::Connecting.can_reconnect());
    assert!(!ChannelState::Reconnecting.can_reconnect());
    assert_eq!(ChannelState::Connected.placeholder(), "Waiting for video...");
}
