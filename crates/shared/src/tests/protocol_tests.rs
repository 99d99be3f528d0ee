use super::*;

#[test]
fn parses_display_text() {
    assert_eq!(
        Command::parse("display_text_default_Hello").expect("parse"),
        Command::DisplayText {
            region: "default".into(),
            text: "Hello".into(),
        }
    );
}

#[test]
fn display_text_keeps_only_the_first_text_field() {
    let command = Command::parse("display_text_default_Hello_world").expect("parse");
    assert_eq!(
        command,
        Command::DisplayText {
            region: "default".into(),
            text: "Hello".into(),
        }
    );
    assert_eq!(command.node_id().as_deref(), Some("text_default"));
}

#[test]
fn reassembles_image_path_containing_separator() {
    let command = Command::parse("display_image_display_default_images/welcome.png").expect("parse");
    assert_eq!(
        command,
        Command::DisplayImage {
            region: "display".into(),
            path: "default_images/welcome.png".into(),
        }
    );
    assert_eq!(command.node_id().as_deref(), Some("image_display"));
}

#[test]
fn parses_image_button() {
    let command = Command::parse("display_button_start$img/foo.png").expect("parse");
    assert_eq!(
        command,
        Command::DisplayButton(ButtonSpec {
            id: ElementId::from("start"),
            kind: ControlKind::Image,
            value: "img/foo.png".into(),
        })
    );
}

#[test]
fn parses_label_button_with_separator_in_payload() {
    let command = Command::parse("display_button_yes_no$Yes_or_no").expect("parse");
    assert_eq!(
        command,
        Command::DisplayButton(ButtonSpec {
            id: ElementId::from("yes_no"),
            kind: ControlKind::Label,
            value: "Yes_or_no".into(),
        })
    );
}

#[test]
fn short_values_are_labels() {
    let spec = ButtonSpec::parse("ok$im").expect("parse");
    assert_eq!(spec.kind, ControlKind::Label);
    assert_eq!(spec.value, "im");
}

#[test]
fn button_drops_segments_after_second_separator() {
    let spec = ButtonSpec::parse("a$b$c").expect("parse");
    assert_eq!(spec.id.as_str(), "a");
    assert_eq!(spec.value, "b");
}

#[test]
fn button_without_separator_is_malformed() {
    assert_eq!(
        Command::parse("display_button_lonely"),
        Err(CommandError::MalformedButton("lonely".into()))
    );
    assert!(matches!(
        Command::parse("display_button_$label"),
        Err(CommandError::MalformedButton(_))
    ));
}

#[test]
fn parses_remove_buttons() {
    assert_eq!(Command::parse("remove_buttons"), Ok(Command::RemoveButtons));
}

#[test]
fn remove_other_targets_are_unknown_subtypes() {
    assert_eq!(
        Command::parse("remove_images"),
        Err(CommandError::UnknownSubtype {
            verb: "remove".into(),
            subtype: "images".into(),
        })
    );
}

#[test]
fn reassembles_url() {
    assert_eq!(
        Command::parse("url_http://host/a_b"),
        Ok(Command::Navigate {
            url: "http://host/a_b".into(),
        })
    );
}

#[test]
fn too_few_tokens_are_malformed() {
    assert_eq!(
        Command::parse("display_text_onlyid"),
        Err(CommandError::Malformed {
            verb: "display text".into(),
            expected: 4,
            actual: 3,
        })
    );
    assert!(matches!(
        Command::parse("display_image_default"),
        Err(CommandError::Malformed { expected: 4, .. })
    ));
    assert!(matches!(
        Command::parse("display_button"),
        Err(CommandError::Malformed { expected: 3, .. })
    ));
    assert!(matches!(
        Command::parse("display"),
        Err(CommandError::Malformed { expected: 2, .. })
    ));
    assert!(matches!(
        Command::parse("remove"),
        Err(CommandError::Malformed { expected: 2, .. })
    ));
    assert!(matches!(
        Command::parse("url"),
        Err(CommandError::Malformed { expected: 2, .. })
    ));
}

#[test]
fn unknown_verbs_and_subtypes_are_rejected() {
    assert_eq!(
        Command::parse("dance_now"),
        Err(CommandError::UnknownVerb("dance".into()))
    );
    assert_eq!(Command::parse(""), Err(CommandError::UnknownVerb(String::new())));
    assert_eq!(
        Command::parse("display_video_x_y"),
        Err(CommandError::UnknownSubtype {
            verb: "display".into(),
            subtype: "video".into(),
        })
    );
}
