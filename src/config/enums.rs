//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smithay_client_toolkit::shell::wlr_layer::KeyboardInteractivity;

/// How the overlay surface participates in keyboard focus.
///
/// With `none` the overlay never steals focus and only shows events from the
/// event feed. `on-demand` and `exclusive` let the compositor route key
/// presses to the overlay itself.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardMode {
    /// Never receive keyboard focus
    #[default]
    None,
    /// Receive focus when the compositor grants it
    OnDemand,
    /// Grab all keyboard input while mapped
    Exclusive,
}

impl KeyboardMode {
    /// Maps to the layer-shell interactivity request.
    pub fn interactivity(self) -> KeyboardInteractivity {
        match self {
            KeyboardMode::None => KeyboardInteractivity::None,
            KeyboardMode::OnDemand => KeyboardInteractivity::OnDemand,
            KeyboardMode::Exclusive => KeyboardInteractivity::Exclusive,
        }
    }

    /// Whether key events may arrive through the Wayland seat.
    pub fn accepts_keyboard(self) -> bool {
        self != KeyboardMode::None
    }
}
