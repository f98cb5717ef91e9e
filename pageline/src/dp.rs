//! Density-independent pixels.
//!
//! Configuration dimensions — fonts, insets, spacing, indicator heights —
//! are given in [`Dp`] and converted to physical pixels through a
//! process-wide scale factor that the host toolkit sets once at startup
//! (and may update when the window moves between displays).

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::px::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// Holds how many physical pixels correspond to one dp unit (1.0 on a
/// standard-density display, 2.0 on a high-density one). Conversions default
/// to 1.0 until the host initializes it via [`set_scale_factor`].
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the process-wide dp-to-pixel scale factor.
///
/// Intended to be called once by the host during startup; later calls update
/// the factor in place.
pub fn set_scale_factor(factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(factor));
    *lock.write() = factor;
}

fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// A length in density-independent pixels.
///
/// A `Dp` value appears at roughly the same physical size regardless of the
/// display's pixel density. All public configuration in this crate is
/// specified in dp.
///
/// # Examples
///
/// ```
/// use pageline::Dp;
///
/// const BAR_HEIGHT: Dp = Dp::new(2.0);
/// let spacing = Dp(32.0);
/// let pixels = spacing.to_pixels_f32();
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Creates a new `Dp` with the specified value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts this dp value to physical pixels as an `f64`.
    pub fn to_pixels_f64(&self) -> f64 {
        self.0 * scale_factor()
    }

    /// Converts this dp value to physical pixels as an `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        self.to_pixels_f64() as f32
    }

    /// Creates a `Dp` value from a physical pixel count.
    pub fn from_pixels_f64(value: f64) -> Self {
        Dp(value / scale_factor())
    }

    /// Converts this `Dp` value to a [`Px`] value.
    pub fn to_px(&self) -> Px {
        Px::from_f32(self.to_pixels_f32())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

impl From<Px> for Dp {
    fn from(px: Px) -> Self {
        Dp::from_pixels_f64(f64::from(px.raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scale_conversions() {
        // Tests never initialize SCALE_FACTOR, so conversions are 1:1.
        let dp = Dp(16.0);
        assert_eq!(dp.to_px(), Px(16));
        assert_eq!(Dp::from_pixels_f64(24.0), Dp(24.0));

        let round_trip: Dp = Px(48).into();
        assert_eq!(round_trip, Dp(48.0));
    }
}
