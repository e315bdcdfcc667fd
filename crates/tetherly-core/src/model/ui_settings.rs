// ── Presentation preferences ──
//
// Purely cosmetic. The only contract is the mapping from settings to the
// render parameters a front end consumes (colours, durations, radii).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Default,
    Ocean,
    Forest,
    Sunset,
    Purple,
    Minimal,
}

impl Theme {
    /// `(accent, background)` hex colours.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::Default => ("#00E5CC", "#000000"),
            Self::Ocean => ("#3B82F6", "#0A1628"),
            Self::Forest => ("#22C55E", "#0A1F0A"),
            Self::Sunset => ("#F97316", "#1F0A0A"),
            Self::Purple => ("#A855F7", "#150A1F"),
            Self::Minimal => ("#FFFFFF", "#0A0A0A"),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    Instant,
}

impl AnimationSpeed {
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Slow => 400,
            Self::Normal => 250,
            Self::Fast => 150,
            Self::Instant => 0,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CornerStyle {
    None,
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

impl CornerStyle {
    pub fn radius(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Small => 8,
            Self::Medium => 16,
            Self::Large => 24,
            Self::Full => 999,
        }
    }
}

/// Cosmetic preferences. Missing fields in a stored document fall back to
/// the defaults, so older snapshots keep loading as new toggles appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct UiSettings {
    #[serde(deserialize_with = "or_default")]
    pub theme: Theme,
    #[serde(deserialize_with = "or_default")]
    pub animation_speed: AnimationSpeed,
    #[serde(deserialize_with = "or_default")]
    pub corner_style: CornerStyle,
    #[serde(deserialize_with = "or_default")]
    pub show_animations: bool,
    #[serde(deserialize_with = "or_default")]
    pub enable_haptics: bool,
    #[serde(deserialize_with = "or_default")]
    pub reduce_motion: bool,
}

/// An unrecognised value resets only its own field.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            animation_speed: AnimationSpeed::Normal,
            corner_style: CornerStyle::Medium,
            show_animations: true,
            enable_haptics: true,
            reduce_motion: false,
        }
    }
}

impl UiSettings {
    pub fn accent_color(&self) -> &'static str {
        self.theme.colors().0
    }

    pub fn background_color(&self) -> &'static str {
        self.theme.colors().1
    }

    /// Zero whenever reduced motion is requested.
    pub fn animation_duration_ms(&self) -> u32 {
        if self.reduce_motion {
            0
        } else {
            self.animation_speed.duration_ms()
        }
    }

    pub fn corner_radius(&self) -> u32 {
        self.corner_style.radius()
    }
}
