//! Configuration type definitions.

use std::collections::BTreeMap;
use std::time::Duration;

use super::enums::KeyboardMode;
use crate::draw::{Color, FontDescriptor};
use crate::draw::layout::PanelStyle;
use crate::overlay::AnimationTiming;
use crate::placement::Placement;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Animation timing settings.
///
/// Controls the pop-in after a key press and the hold/fade after release.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnimationConfig {
    /// Pop-in duration in milliseconds (valid range: 1 - 2000)
    #[serde(default = "default_appear_ms")]
    pub appear_ms: u64,

    /// Extra scale at the start of the pop-in; 0.2 starts the label at 120% (valid range: 0.0 - 1.0)
    #[serde(default = "default_pop_scale")]
    pub pop_scale: f64,

    /// Time the label stays fully opaque after release, in milliseconds (valid range: 0 - 60000)
    #[serde(default = "default_fade_delay_ms")]
    pub fade_delay_ms: u64,

    /// Fade-out duration in milliseconds (valid range: 1 - 60000)
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            appear_ms: default_appear_ms(),
            pop_scale: default_pop_scale(),
            fade_delay_ms: default_fade_delay_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl AnimationConfig {
    /// Converts the millisecond settings into animation timing.
    pub fn timing(&self) -> AnimationTiming {
        AnimationTiming {
            appear: Duration::from_millis(self.appear_ms),
            pop_scale: self.pop_scale,
            fade_delay: Duration::from_millis(self.fade_delay_ms),
            fade: Duration::from_millis(self.fade_ms),
        }
    }
}

/// Overlay window placement.
///
/// The window is horizontally centered on the desktop; its top edge sits
/// `percent_from_bottom` of the desktop height above the bottom edge, pulled
/// up when the window would otherwise extend past it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlacementConfig {
    /// Fraction of the desktop height between the window top and the bottom edge (valid range: 0.0 - 1.0)
    #[serde(default = "default_percent_from_bottom")]
    pub percent_from_bottom: f64,

    /// Maximum overlay window width in pixels (valid range: 100 - 8192)
    #[serde(default = "default_max_width")]
    pub max_width: i32,

    /// Maximum overlay window height in pixels (valid range: 50 - 4096)
    #[serde(default = "default_max_height")]
    pub max_height: i32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            percent_from_bottom: default_percent_from_bottom(),
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}

impl PlacementConfig {
    pub fn placement(&self) -> Placement {
        Placement {
            percent_from_bottom: self.percent_from_bottom,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}

/// Label and panel appearance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StyleConfig {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Resting font size in points (valid range: 8.0 - 200.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Horizontal padding between text and panel edge (valid range: 0.0 - 200.0)
    #[serde(default = "default_padding_x")]
    pub padding_x: f64,

    /// Vertical padding between text and panel edge (valid range: 0.0 - 200.0)
    #[serde(default = "default_padding_y")]
    pub padding_y: f64,

    /// Border thickness around the panel; 0 disables the border (valid range: 0.0 - 50.0)
    #[serde(default = "default_border_thickness")]
    pub border_thickness: f64,

    /// Panel fill color [R, G, B, A] (0.0-1.0 range)
    #[serde(default = "default_panel_color")]
    pub panel_color: [f64; 4],

    /// Text and border color [R, G, B, A] (0.0-1.0 range)
    #[serde(default = "default_text_color")]
    pub text_color: [f64; 4],
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            font_size: default_font_size(),
            padding_x: default_padding_x(),
            padding_y: default_padding_y(),
            border_thickness: default_border_thickness(),
            panel_color: default_panel_color(),
            text_color: default_text_color(),
        }
    }
}

impl StyleConfig {
    /// Builds the render-side panel style.
    pub fn panel_style(&self) -> PanelStyle {
        PanelStyle {
            font: FontDescriptor::new(
                self.font_family.clone(),
                self.font_weight.clone(),
                self.font_style.clone(),
            ),
            font_size: self.font_size,
            padding_x: self.padding_x,
            padding_y: self.padding_y,
            border_thickness: self.border_thickness,
            panel_color: Color::from_array(self.panel_color),
            text_color: Color::from_array(self.text_color),
        }
    }
}

/// Performance tuning options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// Frame timer rate while the label is animating (valid range: 1 - 240)
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,

    /// Number of shared-memory buffers (valid range: 2 - 4)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Skip frame ticks while the compositor has not yet presented the previous frame
    #[serde(default = "default_enable_vsync")]
    pub enable_vsync: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
            buffer_count: default_buffer_count(),
            enable_vsync: default_enable_vsync(),
        }
    }
}

impl PerformanceConfig {
    /// Interval between frame timer ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

/// Input source settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct InputConfig {
    /// Whether the overlay surface accepts keyboard focus (none, on-demand, exclusive)
    #[serde(default)]
    pub keyboard_interactivity: KeyboardMode,
}

/// Label text overrides.
///
/// # Example TOML
/// ```toml
/// [labels.aliases]
/// Space = "Пробел"
/// Minus = "Минус"
/// Up = "Стрелка Вверх"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct LabelsConfig {
    /// Key name → display text, replacing or extending the built-in aliases
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_appear_ms() -> u64 {
    100
}

fn default_pop_scale() -> f64 {
    0.2
}

fn default_fade_delay_ms() -> u64 {
    1000
}

fn default_fade_ms() -> u64 {
    1000
}

fn default_percent_from_bottom() -> f64 {
    0.2
}

fn default_max_width() -> i32 {
    1000
}

fn default_max_height() -> i32 {
    200
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_font_size() -> f64 {
    50.0
}

fn default_padding_x() -> f64 {
    20.0
}

fn default_padding_y() -> f64 {
    10.0
}

fn default_border_thickness() -> f64 {
    6.0
}

fn default_panel_color() -> [f64; 4] {
    [0.6, 0.6, 0.6, 0.85]
}

fn default_text_color() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_target_fps() -> u32 {
    60
}

fn default_buffer_count() -> u32 {
    3
}

fn default_enable_vsync() -> bool {
    true
}
