#![forbid(unsafe_code)]

//! Grayscale iteration-to-color mapping.

use std::fmt;

/// Opaque 24-bit color packed as `0x00RRGGBB`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PackedRgb(pub u32);

impl PackedRgb {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Same intensity on all three channels.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Debug for PackedRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00FF_FFFF)
    }
}

/// Map an iteration count to a gray level: `iteration * 255 / budget`,
/// integer division, saturating at white.
///
/// Points that never escaped are passed in with `iteration == budget` and
/// come out white; points escaping on the first step come out black.
#[inline]
pub fn color_for(iteration: u32, budget: u32) -> PackedRgb {
    debug_assert!(budget >= 1, "iteration budget starts at 1");
    let budget = u64::from(budget.max(1));
    let v = (u64::from(iteration) * 255 / budget).min(255);
    PackedRgb::gray(v as u8)
}
