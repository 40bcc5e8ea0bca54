use duopuzzle_core::config::{DelayValue, DEFAULT_WIN_AUDIO};
use duopuzzle_core::{ConfigError, FrameInsets, PuzzleConfig, Side, Theme};

#[test]
fn empty_config_resolves_to_defaults() {
    let settings = PuzzleConfig::from_toml_str("").expect("empty toml").resolve();
    assert_eq!((settings.rows, settings.cols), (3, 3));
    assert_eq!(settings.theme, Theme::Standard);
    assert_eq!(settings.win_audio, DEFAULT_WIN_AUDIO);
    assert_eq!(settings.delay_ms, 0);
    assert!(settings.frame.is_none());
    assert!(settings.background_img.is_none());
}

#[test]
fn toml_fields_use_host_names() {
    let raw = r#"
rows = 4
cols = 5
image1 = "front.png"
image2 = "back.png"
winAudio = "sounds/yay.ogg"
delay = 250
"#;
    let settings = PuzzleConfig::from_toml_str(raw).expect("valid toml").resolve();
    assert_eq!((settings.rows, settings.cols), (4, 5));
    assert_eq!(settings.image_for(Side::Front), Some("front.png"));
    assert_eq!(settings.image_for(Side::Back), Some("back.png"));
    assert_eq!(settings.win_audio, "sounds/yay.ogg");
    assert_eq!(settings.delay_ms, 250);
}

#[test]
fn json_accepts_textual_delay() {
    let raw = r#"{"rows": 2, "cols": 0, "delay": "1500ms", "backgroundImg": "bg.jpg"}"#;
    let config = PuzzleConfig::from_json_str(raw).expect("valid json");
    assert_eq!(config.delay, Some(DelayValue::Text("1500ms".into())));
    let settings = config.resolve();
    assert_eq!((settings.rows, settings.cols), (2, 3));
    assert_eq!(settings.delay_ms, 1500);
    assert_eq!(settings.background_img.as_deref(), Some("bg.jpg"));
}

#[test]
fn garbage_delay_means_no_delay() {
    assert_eq!(DelayValue::Text("soon".into()).millis(), 0);
    assert_eq!(DelayValue::Text(" 40 ".into()).millis(), 40);
}

#[test]
fn basic_skin_supplies_frame_and_background() {
    let config = PuzzleConfig {
        skin: Some("basic".into()),
        ..PuzzleConfig::default()
    };
    let settings = config.resolve();
    assert_eq!(settings.theme, Theme::Basic);
    let frame = settings.frame.expect("basic frame");
    assert_eq!(frame.image, "/images/basic_frame.png");
    assert_eq!(
        frame.insets,
        FrameInsets {
            top: 25.0,
            bottom: 23.0,
            left: 25.0,
            right: 27.0,
        }
    );
    assert_eq!(
        settings.background_img.as_deref(),
        Some("/images/basic_background.jpg")
    );
}

#[test]
fn explicit_values_override_skin_assets() {
    let raw = r#"{"skin": "BASIC", "frameImg": "mine.png", "framePaddingLeft": 4, "backgroundImg": "bg.png"}"#;
    let settings = PuzzleConfig::from_json_str(raw).expect("valid json").resolve();
    let frame = settings.frame.expect("frame");
    assert_eq!(frame.image, "mine.png");
    assert_eq!(frame.insets.left, 4.0);
    assert_eq!(frame.insets.right, 27.0);
    assert_eq!(settings.background_img.as_deref(), Some("bg.png"));
}

#[test]
fn unknown_skin_falls_back_to_standard() {
    let config = PuzzleConfig {
        skin: Some("neon".into()),
        frame_img: Some("  ".into()),
        ..PuzzleConfig::default()
    };
    let settings = config.resolve();
    assert_eq!(settings.theme, Theme::Standard);
    assert!(settings.frame.is_none());
}

#[test]
fn frame_without_skin_has_zero_padding_by_default() {
    let config = PuzzleConfig {
        frame_img: Some("frame.png".into()),
        frame_padding_top: Some(12.0),
        ..PuzzleConfig::default()
    };
    let insets = config.resolve().frame_insets().expect("frame");
    assert_eq!(insets.top, 12.0);
    assert_eq!(insets.bottom, 0.0);
}

#[test]
fn malformed_input_reports_format() {
    let err = PuzzleConfig::from_toml_str("rows = ").expect_err("truncated toml");
    assert!(matches!(err, ConfigError::Toml(_)));
    assert!(err.to_string().contains("toml"));

    let err = PuzzleConfig::from_json_str("{").expect_err("truncated json");
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn sloppy_dimensions_fall_back_instead_of_failing() {
    let settings = PuzzleConfig::from_json_str(r#"{"rows": "4", "cols": 2}"#)
        .expect("numeric string")
        .resolve();
    assert_eq!((settings.rows, settings.cols), (4, 2));

    for raw in [
        r#"{"rows": -1}"#,
        r#"{"rows": 2.5}"#,
        r#"{"rows": "x"}"#,
        r#"{"rows": null}"#,
        r#"{"rows": [3]}"#,
        r#"{"rows": 0}"#,
    ] {
        let settings = PuzzleConfig::from_json_str(raw)
            .unwrap_or_else(|err| panic!("{raw}: {err}"))
            .resolve();
        assert_eq!(settings.rows, 3, "{raw}");
    }

    let settings = PuzzleConfig::from_json_str(r#"{"cols": 5.0}"#)
        .expect("whole float")
        .resolve();
    assert_eq!(settings.cols, 5);
}

#[test]
fn toml_dimensions_are_lenient_too() {
    let settings = PuzzleConfig::from_toml_str("rows = \"6\"\ncols = -3")
        .expect("lenient toml")
        .resolve();
    assert_eq!((settings.rows, settings.cols), (6, 3));
}

#[test]
fn oversized_grids_are_capped() {
    let settings = PuzzleConfig::from_json_str(r#"{"rows": 70000, "cols": 70000}"#)
        .expect("valid json")
        .resolve();
    assert_eq!(settings.rows, duopuzzle_core::generator::MAX_GRID_SIDE);
    assert_eq!(settings.cols, duopuzzle_core::generator::MAX_GRID_SIDE);
}
