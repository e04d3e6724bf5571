#![forbid(unsafe_code)]

//! Pixel-grid primitives.
//!
//! Coordinates are 0-indexed with the origin at the top-left. The scan walks
//! pixels in row-major order, so every coordinate has a linear index
//! `y * width + x` in `0..area`.

/// A pixel position on the render grid.
///
/// Used both as a scan position and as the escape-cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelCoord {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl PixelCoord {
    /// The top-left pixel, where every pass starts.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Pack into one `u64`: `x` in the low 32 bits, `y` in the high 32 bits.
    #[inline]
    pub const fn packed(self) -> u64 {
        self.x as u64 | ((self.y as u64) << 32)
    }

    /// Inverse of [`PixelCoord::packed`].
    #[inline]
    pub const fn from_packed(key: u64) -> Self {
        Self::new(key as u32, (key >> 32) as u32)
    }
}

/// Grid dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl GridSize {
    /// Smallest grid the renderer will accept.
    pub const MIN: Self = Self::new(1, 1);

    /// Create a size as given, zero dimensions included.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create a size with each dimension clamped to at least one pixel.
    ///
    /// Resize events go through this so the coordinate mapper never divides
    /// by zero.
    #[inline]
    pub const fn clamped(width: u32, height: u32) -> Self {
        Self::new(
            if width == 0 { 1 } else { width },
            if height == 0 { 1 } else { height },
        )
    }

    /// Number of pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `coord` lies inside the grid.
    #[inline]
    pub const fn contains(&self, coord: PixelCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Row-major linear index of `coord`.
    #[inline]
    pub const fn index_of(&self, coord: PixelCoord) -> u64 {
        coord.y as u64 * self.width as u64 + coord.x as u64
    }

    /// Coordinate at row-major `index`. Zero-width grids map everything to
    /// the origin.
    #[inline]
    pub const fn coord_at(&self, index: u64) -> PixelCoord {
        if self.width == 0 {
            return PixelCoord::ORIGIN;
        }
        let width = self.width as u64;
        PixelCoord::new((index % width) as u32, (index / width) as u32)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_key_puts_row_in_high_half() {
        let coord = PixelCoord::new(7, 3);
        assert_eq!(coord.packed(), 7 | (3 << 32));
        assert_eq!(PixelCoord::from_packed(coord.packed()), coord);
    }

    #[test]
    fn packed_keys_distinguish_transposed_coords() {
        assert_ne!(
            PixelCoord::new(1, 2).packed(),
            PixelCoord::new(2, 1).packed()
        );
    }

    #[test]
    fn clamped_never_yields_zero() {
        assert_eq!(GridSize::clamped(0, 0), GridSize::MIN);
        assert_eq!(GridSize::clamped(0, 9), GridSize::new(1, 9));
        assert_eq!(GridSize::clamped(4, 5), GridSize::new(4, 5));
    }

    #[test]
    fn row_major_index_wraps_at_width() {
        let size = GridSize::new(4, 3);
        assert_eq!(size.coord_at(3), PixelCoord::new(3, 0));
        assert_eq!(size.coord_at(4), PixelCoord::new(0, 1));
        assert_eq!(size.coord_at(11), PixelCoord::new(3, 2));
        assert_eq!(size.index_of(PixelCoord::new(3, 2)), 11);
    }

    #[test]
    fn zero_width_grid_is_safe() {
        let size = GridSize::new(0, 5);
        assert!(size.is_empty());
        assert_eq!(size.area(), 0);
        assert_eq!(size.coord_at(10), PixelCoord::ORIGIN);
    }

    #[test]
    fn contains_excludes_far_edges() {
        let size = GridSize::new(2, 2);
        assert!(size.contains(PixelCoord::new(1, 1)));
        assert!(!size.contains(PixelCoord::new(2, 0)));
        assert!(!size.contains(PixelCoord::new(0, 2)));
    }
}
