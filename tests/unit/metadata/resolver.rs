use super::*;

#[test]
fn request_uses_title_and_extension_when_both_exist() {
    let tags = LocalTags {
        title: Some("Blue Monday".to_string()),
        artist: Some("New Order".to_string()),
        album: None,
    };
    let req = ResolveRequest::from_local(Path::new("music/01 track.flac"), &tags);
    assert_eq!(req.name, "Blue Monday.flac");
    assert_eq!(req.artist.as_deref(), Some("New Order"));
    assert_eq!(req.album, None);
}

#[test]
fn request_falls_back_to_raw_path() {
    let no_title = ResolveRequest::from_local(Path::new("music/a.mp3"), &LocalTags::default());
    assert_eq!(no_title.name, "music/a.mp3");

    let tags = LocalTags {
        title: Some("Untitled".to_string()),
        ..LocalTags::default()
    };
    let no_ext = ResolveRequest::from_local(Path::new("music/raw"), &tags);
    assert_eq!(no_ext.name, "music/raw");
}

#[test]
fn raw_path_fallback_drops_leading_cur_dir() {
    let req = ResolveRequest::from_local(Path::new("./music/a.mp3"), &LocalTags::default());
    assert_eq!(req.name, "music/a.mp3");

    let nested = ResolveRequest::from_local(Path::new("music/./b.mp3"), &LocalTags::default());
    assert_eq!(nested.name, "music/b.mp3");
}

#[test]
fn absent_tags_are_not_serialized() {
    let req = ResolveRequest {
        name: "x.mp3".to_string(),
        artist: None,
        album: Some("LP".to_string()),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "x.mp3", "album": "LP" }));
}

#[test]
fn envelope_parses_with_null_optionals() {
    let body = r#"{ "body": { "name": "a", "render": "A - Song", "ext": "mp3", "artist": null, "album": null } }"#;
    let env: ResolveEnvelope = serde_json::from_str(body).unwrap();
    assert_eq!(env.body.render, "A - Song");
    assert_eq!(env.body.artist, None);

    let missing = r#"{ "body": { "name": "a", "render": "A", "ext": "mp3" } }"#;
    let env: ResolveEnvelope = serde_json::from_str(missing).unwrap();
    assert_eq!(env.body.album, None);
}

#[test]
fn envelope_without_render_is_rejected() {
    let body = r#"{ "body": { "name": "a", "ext": "mp3" } }"#;
    assert!(serde_json::from_str::<ResolveEnvelope>(body).is_err());
}
