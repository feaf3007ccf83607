//! RGBA color type and alpha compositing.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use keyshow::draw::Color;
/// let gray = Color { r: 0.6, g: 0.6, b: 0.6, a: 0.85 };
/// let faded = gray.fade(0.5);
/// assert!((faded.a - 0.425).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from a `[r, g, b, a]` config array.
    pub fn from_array(rgba: [f64; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Same color with its base alpha multiplied by `alpha`.
    pub fn fade(self, alpha: f64) -> Self {
        Self {
            a: self.a * alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Default panel fill (light gray, 85% opaque)
pub const PANEL_GRAY: Color = Color {
    r: 0.6,
    g: 0.6,
    b: 0.6,
    a: 0.85,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_multiplies_base_alpha_only() {
        let faded = PANEL_GRAY.fade(0.5);
        assert_eq!((faded.r, faded.g, faded.b), (0.6, 0.6, 0.6));
        assert!((faded.a - 0.425).abs() < 1e-12);
        assert_eq!(BLACK.fade(0.25).a, 0.25);
    }

    #[test]
    fn fade_clamps_factor() {
        assert_eq!(BLACK.fade(2.0).a, 1.0);
        assert_eq!(BLACK.fade(-1.0).a, 0.0);
    }
}
