#![forbid(unsafe_code)]

//! Display surfaces: the only sink the scan writes to.

use std::io;

use crate::color::PackedRgb;
use crate::grid::{GridSize, PixelCoord};

/// A width×height RGB pixel grid that can be shown.
///
/// The engine only ever writes single pixels and never reads back. Writes
/// outside the grid are ignored.
pub trait DisplaySurface {
    /// Current grid dimensions.
    fn size(&self) -> GridSize;

    fn width(&self) -> u32 {
        self.size().width
    }

    fn height(&self) -> u32 {
        self.size().height
    }

    /// Replace the backing buffer with one of `size`, cleared to black.
    fn resize(&mut self, size: GridSize);

    fn write_pixel(&mut self, coord: PixelCoord, color: PackedRgb);

    /// Push the current buffer to the display.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from the backing device.
    fn present(&mut self) -> io::Result<()>;
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for &mut S {
    fn size(&self) -> GridSize {
        (**self).size()
    }

    fn resize(&mut self, size: GridSize) {
        (**self).resize(size);
    }

    fn write_pixel(&mut self, coord: PixelCoord, color: PackedRgb) {
        (**self).write_pixel(coord, color);
    }

    fn present(&mut self) -> io::Result<()> {
        (**self).present()
    }
}

/// Row-major in-memory surface.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    size: GridSize,
    pixels: Vec<PackedRgb>,
    writes: u64,
    presents: u64,
}

impl MemorySurface {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            pixels: vec![PackedRgb::BLACK; size.area() as usize],
            writes: 0,
            presents: 0,
        }
    }

    /// Pixel at `coord`, `None` outside the grid.
    #[must_use]
    pub fn pixel(&self, coord: PixelCoord) -> Option<PackedRgb> {
        if !self.size.contains(coord) {
            return None;
        }
        self.pixels.get(self.size.index_of(coord) as usize).copied()
    }

    /// Whole buffer in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[PackedRgb] {
        &self.pixels
    }

    /// In-bounds `write_pixel` calls since construction.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    #[must_use]
    pub fn presents(&self) -> u64 {
        self.presents
    }
}

impl DisplaySurface for MemorySurface {
    fn size(&self) -> GridSize {
        self.size
    }

    fn resize(&mut self, size: GridSize) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area() as usize, PackedRgb::BLACK);
    }

    fn write_pixel(&mut self, coord: PixelCoord, color: PackedRgb) {
        if !self.size.contains(coord) {
            return;
        }
        let idx = self.size.index_of(coord) as usize;
        if let Some(slot) = self.pixels.get_mut(idx) {
            *slot = color;
            self.writes += 1;
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_black() {
        let s = MemorySurface::new(GridSize::new(3, 2));
        assert_eq!(s.pixels().len(), 6);
        assert!(s.pixels().iter().all(|&p| p == PackedRgb::BLACK));
        assert_eq!((s.width(), s.height()), (3, 2));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut s = MemorySurface::new(GridSize::new(2, 2));
        s.write_pixel(PixelCoord::new(2, 0), PackedRgb::WHITE);
        s.write_pixel(PixelCoord::new(0, 2), PackedRgb::WHITE);
        assert_eq!(s.writes(), 0);
        assert_eq!(s.pixel(PixelCoord::new(2, 0)), None);
    }

    #[test]
    fn resize_replaces_the_buffer() {
        let mut s = MemorySurface::new(GridSize::new(2, 2));
        s.write_pixel(PixelCoord::new(1, 1), PackedRgb::WHITE);
        s.resize(GridSize::new(4, 1));
        assert_eq!(s.size(), GridSize::new(4, 1));
        assert_eq!(s.pixel(PixelCoord::new(1, 0)), Some(PackedRgb::BLACK));
        assert_eq!(s.pixel(PixelCoord::new(1, 1)), None);
    }

    #[test]
    fn present_is_counted() {
        let mut s = MemorySurface::new(GridSize::MIN);
        s.present().unwrap();
        (&mut s).present().unwrap();
        assert_eq!(s.presents(), 2);
    }
}
