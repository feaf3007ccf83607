//! Overlay window placement on the desktop.

use thiserror::Error;

/// Placement tunables, resolved from `[placement]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Fraction of the desktop height between the window top and the bottom edge
    pub percent_from_bottom: f64,
    pub max_width: i32,
    pub max_height: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            percent_from_bottom: 0.2,
            max_width: 1000,
            max_height: 200,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    #[error("desktop bounds are unavailable: no output was advertised by the compositor")]
    DesktopUnavailable,
    #[error("desktop reports an unusable size of {width}x{height}")]
    InvalidDesktopSize { width: i32, height: i32 },
}

/// Overlay window rectangle in desktop pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowBounds {
    /// Distance between the window bottom and the desktop bottom edge.
    pub fn bottom_margin(&self, desktop_height: i32) -> i32 {
        (desktop_height - (self.y + self.height)).max(0)
    }
}

/// Computes overlay bounds for a desktop of `desktop` (width, height).
///
/// The window is horizontally centered. Its top edge starts at
/// `percent_from_bottom` of the height above the bottom edge and moves up
/// when the window would otherwise extend past the bottom. Windows larger
/// than the desktop are shrunk to fit.
pub fn overlay_bounds(
    desktop: Option<(i32, i32)>,
    placement: &Placement,
) -> Result<WindowBounds, PlacementError> {
    let (desktop_width, desktop_height) = desktop.ok_or(PlacementError::DesktopUnavailable)?;
    if desktop_width <= 0 || desktop_height <= 0 {
        return Err(PlacementError::InvalidDesktopSize {
            width: desktop_width,
            height: desktop_height,
        });
    }

    let width = placement.max_width.clamp(1, desktop_width);
    let height = placement.max_height.clamp(1, desktop_height);
    let fraction = placement.percent_from_bottom.clamp(0.0, 1.0);

    let mut top = (f64::from(desktop_height) * (1.0 - fraction)).round() as i32;
    if desktop_height - top < height {
        top = desktop_height - height;
    }

    Ok(WindowBounds {
        x: desktop_width / 2 - width / 2,
        y: top,
        width,
        height,
    })
}
