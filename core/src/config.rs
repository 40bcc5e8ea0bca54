use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::generator::grid_or_default;
use crate::geometry::FrameInsets;
use crate::piece::Side;

pub const DEFAULT_WIN_AUDIO: &str = "sounds/win.wav";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Basic,
    Futuristic,
    #[default]
    Standard,
    Retro,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BASIC" => Some(Theme::Basic),
            "FUTURISTIC" => Some(Theme::Futuristic),
            "STANDARD" => Some(Theme::Standard),
            "RETRO" => Some(Theme::Retro),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Basic => "BASIC",
            Theme::Futuristic => "FUTURISTIC",
            Theme::Standard => "STANDARD",
            Theme::Retro => "RETRO",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeAssets {
    pub background_img: Option<&'static str>,
    pub frame_img: Option<&'static str>,
    pub frame_padding: Option<FrameInsets>,
}

pub fn theme_assets(theme: Theme) -> ThemeAssets {
    match theme {
        Theme::Basic => ThemeAssets {
            background_img: Some("/images/basic_background.jpg"),
            frame_img: Some("/images/basic_frame.png"),
            frame_padding: Some(FrameInsets {
                top: 25.0,
                bottom: 23.0,
                left: 25.0,
                right: 27.0,
            }),
        },
        Theme::Futuristic | Theme::Standard | Theme::Retro => ThemeAssets::default(),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DelayValue {
    Millis(u64),
    Text(String),
}

impl DelayValue {
    pub fn millis(&self) -> u64 {
        match self {
            DelayValue::Millis(value) => *value,
            DelayValue::Text(text) => {
                let digits: String = text
                    .trim()
                    .chars()
                    .take_while(|ch| ch.is_ascii_digit())
                    .collect();
                digits.parse().unwrap_or(0)
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Count(u64),
    Signed(i64),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Grid sizes come from hand-edited host config. Anything that is not a
/// positive whole number reads as missing so the 3x3 fallback applies.
fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDimension>::deserialize(deserializer)?;
    let value = match raw {
        Some(RawDimension::Count(value)) => u32::try_from(value).ok(),
        Some(RawDimension::Number(value))
            if value.fract() == 0.0 && value >= 1.0 && value <= u32::MAX as f64 =>
        {
            Some(value as u32)
        }
        Some(RawDimension::Text(text)) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(value.filter(|value| *value > 0))
}

/// Host-supplied settings as they arrive; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PuzzleConfig {
    #[serde(deserialize_with = "lenient_dimension")]
    pub rows: Option<u32>,
    #[serde(deserialize_with = "lenient_dimension")]
    pub cols: Option<u32>,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub skin: Option<String>,
    pub background_img: Option<String>,
    pub frame_img: Option<String>,
    pub frame_padding_top: Option<f32>,
    pub frame_padding_bottom: Option<f32>,
    pub frame_padding_left: Option<f32>,
    pub frame_padding_right: Option<f32>,
    pub win_audio: Option<String>,
    pub delay: Option<DelayValue>,
}

impl PuzzleConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(ConfigError::Toml)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Json)
    }

    /// Merges defaults and theme assets under the explicit values.
    pub fn resolve(&self) -> PuzzleSettings {
        let (rows, cols) = grid_or_default(
            self.rows.map(|value| value as usize),
            self.cols.map(|value| value as usize),
        );
        let theme = self
            .skin
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default();
        let assets = theme_assets(theme);
        let base_padding = assets.frame_padding.unwrap_or_default();
        let frame_img = non_empty(self.frame_img.as_deref())
            .map(str::to_string)
            .or_else(|| assets.frame_img.map(str::to_string));
        let frame = frame_img.map(|image| FrameSpec {
            image,
            insets: FrameInsets {
                top: self.frame_padding_top.unwrap_or(base_padding.top),
                bottom: self.frame_padding_bottom.unwrap_or(base_padding.bottom),
                left: self.frame_padding_left.unwrap_or(base_padding.left),
                right: self.frame_padding_right.unwrap_or(base_padding.right),
            },
        });
        PuzzleSettings {
            rows,
            cols,
            theme,
            front_image: non_empty(self.image1.as_deref()).map(str::to_string),
            back_image: non_empty(self.image2.as_deref()).map(str::to_string),
            background_img: non_empty(self.background_img.as_deref())
                .map(str::to_string)
                .or_else(|| assets.background_img.map(str::to_string)),
            frame,
            win_audio: non_empty(self.win_audio.as_deref())
                .unwrap_or(DEFAULT_WIN_AUDIO)
                .to_string(),
            delay_ms: self.delay.as_ref().map(DelayValue::millis).unwrap_or(0),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    pub image: String,
    pub insets: FrameInsets,
}

/// Fully resolved, immutable settings for one puzzle session.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleSettings {
    pub rows: usize,
    pub cols: usize,
    pub theme: Theme,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    pub background_img: Option<String>,
    pub frame: Option<FrameSpec>,
    pub win_audio: String,
    pub delay_ms: u64,
}

impl PuzzleSettings {
    pub fn image_for(&self, side: Side) -> Option<&str> {
        match side {
            Side::Front => self.front_image.as_deref(),
            Side::Back => self.back_image.as_deref(),
        }
    }

    pub fn frame_insets(&self) -> Option<FrameInsets> {
        self.frame.as_ref().map(|frame| frame.insets)
    }
}

impl Default for PuzzleSettings {
    fn default() -> Self {
        PuzzleConfig::default().resolve()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Toml(toml::de::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Toml(err) => write!(f, "invalid puzzle config (toml): {err}"),
            ConfigError::Json(err) => write!(f, "invalid puzzle config (json): {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Toml(err) => Some(err),
            ConfigError::Json(err) => Some(err),
        }
    }
}
