use super::*;
use crate::playlist::track::TrackId;

fn seg(i: usize, dur: f64) -> Segment {
    Segment {
        frame_path: PathBuf::from(format!("tmp/{i}.png")),
        audio_path: PathBuf::from(format!("music/{i}.mp3")),
        duration_sec: dur,
    }
}

fn args_as_strings(args: &[OsString]) -> Vec<String> {
    args.iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn filter_graph_concats_in_playlist_order() {
    let graph = filter_graph(3, &AssemblyConfig::default());
    assert!(graph.starts_with("[0:v]setsar=1,format=yuv420p[v0];[1:a]aresample=48000"));
    assert!(graph.contains("[4:v]setsar=1,format=yuv420p[v2];[5:a]"));
    assert!(graph.ends_with("[v0][a0][v1][a1][v2][a2]concat=n=3:v=1:a=1[v][a]"));
}

#[test]
fn args_pair_each_still_with_its_audio_duration() {
    let segments = [seg(0, 3.5), seg(1, 120.25)];
    let args = args_as_strings(&build_ffmpeg_args(
        &segments,
        &AssemblyConfig::default(),
        Path::new("out/.playlist.mp4.partial"),
    ));

    let inputs: Vec<&str> = args
        .iter()
        .enumerate()
        .filter(|(_, a)| a.as_str() == "-i")
        .map(|(i, _)| args[i + 1].as_str())
        .collect();
    assert_eq!(
        inputs,
        ["tmp/0.png", "music/0.mp3", "tmp/1.png", "music/1.mp3"]
    );

    let durations: Vec<&str> = args
        .iter()
        .enumerate()
        .filter(|(_, a)| a.as_str() == "-t")
        .map(|(i, _)| args[i + 1].as_str())
        .collect();
    assert_eq!(durations, ["3.500000", "120.250000"]);

    assert_eq!(args.iter().filter(|a| a.as_str() == "-filter_complex").count(), 1);
    assert_eq!(args.last().map(String::as_str), Some("out/.playlist.mp4.partial"));
}

#[test]
fn args_carry_frame_rate_and_audio_bitrate() {
    let args = args_as_strings(&build_ffmpeg_args(
        &[seg(0, 1.0)],
        &AssemblyConfig::default(),
        Path::new("p.mp4"),
    ));
    let after = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].clone()
    };
    assert_eq!(after("-r"), "0.5");
    assert_eq!(after("-b:a"), "256000");
    assert_eq!(after("-framerate"), "25");
}

#[test]
fn partial_path_is_a_hidden_sibling() {
    assert_eq!(
        partial_path(Path::new("./playlist.mp4")),
        PathBuf::from("./.playlist.mp4.partial")
    );
    assert_eq!(
        partial_path(Path::new("/videos/out.mp4")),
        PathBuf::from("/videos/.out.mp4.partial")
    );
}

#[test]
fn empty_input_reports_empty_and_keeps_old_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("playlist.mp4");
    std::fs::write(&out, b"previous run").unwrap();

    let outcome = assemble(&[], &AssemblyConfig::default(), &out).unwrap();
    assert_eq!(outcome, AssembleOutcome::Empty);
    assert_eq!(std::fs::read(&out).unwrap(), b"previous run");
}

#[test]
fn missing_segment_input_aborts_before_touching_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("playlist.mp4");
    std::fs::write(&out, b"previous run").unwrap();

    let err = assemble(&[seg(0, 1.0)], &AssemblyConfig::default(), &out).unwrap_err();
    assert!(matches!(err, PlaylistError::Assembly(_)));
    assert!(out.exists());
    assert!(!partial_path(&out).exists());
}

#[test]
fn plan_requires_rendered_frames() {
    let track = Track::with_label(TrackId(0), "music/a.mp3", "A");
    let err = plan_segments(&[track], |_| Ok(1.0)).unwrap_err();
    assert!(err.to_string().contains("no rendered frame"));
}

#[test]
fn plan_rejects_missing_audio_and_bad_durations() {
    let dir = tempfile::tempdir().unwrap();
    let frame = dir.path().join("0.png");
    std::fs::write(&frame, b"png").unwrap();
    let audio = dir.path().join("a.mp3");

    let mut track = Track::with_label(TrackId(0), &audio, "A");
    track.frame_image_path = Some(frame.clone());

    let err = plan_segments(std::slice::from_ref(&track), |_| Ok(1.0)).unwrap_err();
    assert!(err.to_string().contains("does not exist"));

    std::fs::write(&audio, b"mp3").unwrap();
    let err = plan_segments(std::slice::from_ref(&track), |_| Ok(0.0)).unwrap_err();
    assert!(err.to_string().contains("no playable duration"));

    let plan = plan_segments(std::slice::from_ref(&track), |_| Ok(2.5)).unwrap();
    assert_eq!(
        plan,
        vec![Segment {
            frame_path: frame,
            audio_path: audio,
            duration_sec: 2.5,
        }]
    );
}

#[test]
fn plan_keeps_playlist_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracks = Vec::new();
    for (i, name) in ["a", "b", "c"].iter().enumerate() {
        let audio = dir.path().join(format!("{name}.mp3"));
        let frame = dir.path().join(format!("{i}.png"));
        std::fs::write(&audio, b"mp3").unwrap();
        std::fs::write(&frame, b"png").unwrap();
        let mut t = Track::with_label(TrackId(i), audio, *name);
        t.frame_image_path = Some(frame);
        tracks.push(t);
    }

    let plan = plan_segments(&tracks, |p| {
        Ok(if p.ends_with("b.mp3") { 2.0 } else { 1.0 })
    })
    .unwrap();
    let frames: Vec<_> = plan
        .iter()
        .map(|s| s.frame_path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(frames, ["0.png", "1.png", "2.png"]);
    assert_eq!(plan[1].duration_sec, 2.0);
}
