use super::*;

#[test]
fn duration_parsing_accepts_positive_seconds_only() {
    assert_eq!(parse_duration(Some("3.250000")), Some(3.25));
    assert_eq!(parse_duration(Some(" 12 ")), Some(12.0));
    assert_eq!(parse_duration(Some("0.000000")), None);
    assert_eq!(parse_duration(Some("N/A")), None);
    assert_eq!(parse_duration(None), None);
}

#[test]
fn probing_a_missing_file_fails_cleanly() {
    if !is_ffprobe_on_path() {
        eprintln!("skipping: ffprobe not on PATH");
        return;
    }
    let err = probe_duration_sec(Path::new("/no/such/file.mp3")).unwrap_err();
    assert!(matches!(err, PlaylistError::Assembly(_)));
}
