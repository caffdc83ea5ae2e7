use super::*;

#[test]
fn parses_full_job() {
    let json = r##"
{
  "input": "tilesets/mario.png",
  "tile_width": 16,
  "tile_height": 16,
  "margin": 5,
  "spacing": 10,
  "extrusion": 2,
  "color": "0x7088ff",
  "parallel": true,
  "threads": 2
}
"##;
    let job = ExtrudeJob::from_reader(json.as_bytes()).unwrap();
    let resolved = job.resolve().unwrap();

    assert_eq!(resolved.input, PathBuf::from("tilesets/mario.png"));
    assert_eq!(
        resolved.output,
        PathBuf::from("tilesets/mario_extruded.png")
    );
    assert_eq!(
        resolved.grid,
        GridSpec::new(16, 16).with_margin(5).with_spacing(10)
    );
    assert_eq!(resolved.extrusion.extrusion, 2);
    assert_eq!(
        resolved.extrusion.background,
        Rgba8::new(0x00, 0x70, 0x88, 0xff)
    );
    assert_eq!(
        resolved.threading,
        Threading {
            parallel: true,
            threads: Some(2)
        }
    );
}

#[test]
fn defaults_match_the_cli() {
    let job = ExtrudeJob {
        input: Some("a.png".into()),
        tile_width: Some(8),
        tile_height: Some(8),
        ..ExtrudeJob::default()
    };
    let resolved = job.resolve().unwrap();
    assert_eq!(resolved.grid, GridSpec::new(8, 8));
    assert_eq!(resolved.extrusion, ExtrusionSpec::default());
    assert_eq!(resolved.threading, Threading::default());
}

#[test]
fn overrides_win() {
    let base = ExtrudeJob {
        input: Some("a.png".into()),
        tile_width: Some(8),
        tile_height: Some(8),
        margin: Some(1),
        ..ExtrudeJob::default()
    };
    let cli = ExtrudeJob {
        tile_width: Some(16),
        output: Some("out.png".into()),
        ..ExtrudeJob::default()
    };
    let merged = base.merged_with(cli);
    assert_eq!(merged.tile_width, Some(16));
    assert_eq!(merged.tile_height, Some(8));
    assert_eq!(merged.margin, Some(1));
    assert_eq!(merged.output, Some(PathBuf::from("out.png")));
}

#[test]
fn missing_required_values_name_the_flag() {
    let err = ExtrudeJob::default().resolve().unwrap_err();
    assert!(err.to_string().contains("--tile-width"));

    let job = ExtrudeJob {
        tile_width: Some(8),
        tile_height: Some(8),
        ..ExtrudeJob::default()
    };
    assert!(job.resolve().unwrap_err().to_string().contains("--input"));
}

#[test]
fn zero_tile_size_is_rejected() {
    let job = ExtrudeJob {
        input: Some("a.png".into()),
        tile_width: Some(0),
        tile_height: Some(8),
        ..ExtrudeJob::default()
    };
    assert!(matches!(
        job.resolve(),
        Err(ExtrudeError::InvalidParameters(_))
    ));
}

#[test]
fn unknown_fields_and_bad_colors_are_config_errors() {
    assert!(matches!(
        ExtrudeJob::from_reader(r#"{"tilewidth": 3}"#.as_bytes()),
        Err(ExtrudeError::Config(_))
    ));
    assert!(matches!(
        ExtrudeJob::from_reader(r##"{"color": "#zzzzzz"}"##.as_bytes()),
        Err(ExtrudeError::Config(_))
    ));
}

#[test]
fn missing_job_file_is_a_config_error() {
    let err = ExtrudeJob::from_path("target/unit_job/does-not-exist.json").unwrap_err();
    assert!(matches!(err, ExtrudeError::Config(_)));
    assert!(err.to_string().contains("does-not-exist.json"));
}
