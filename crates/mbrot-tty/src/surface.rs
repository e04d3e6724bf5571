#![forbid(unsafe_code)]

//! Half-block pixel surface.
//!
//! Each terminal cell shows two vertically stacked pixels with `▀`: the
//! foreground color paints the upper pixel and the background color the
//! lower one. A `cols × rows` terminal is therefore a `cols × rows*2` pixel
//! grid. An odd pixel height leaves the last row's lower half black.
//!
//! `present` diffs against the cells sent last time and only emits cells
//! whose color pair changed, wrapped in a synchronized update so the
//! terminal never shows a half-drawn frame.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use crossterm::queue;

use mbrot_core::{DisplaySurface, GridSize, PackedRgb, PixelCoord};

/// Upper half block.
pub const HALF_BLOCK: char = '\u{2580}';

/// Pixel grid size for a terminal of `cols × rows` cells.
#[inline]
pub fn pixel_size(cols: u16, rows: u16) -> GridSize {
    GridSize::new(u32::from(cols), u32::from(rows) * 2)
}

type CellColors = (PackedRgb, PackedRgb);

#[inline]
fn to_color(c: PackedRgb) -> Color {
    Color::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// [`DisplaySurface`] that renders into a terminal writer with half blocks.
#[derive(Debug)]
pub struct HalfBlockSurface<W: Write> {
    writer: W,
    size: GridSize,
    pixels: Vec<PackedRgb>,
    /// Colors last sent per cell; empty means "repaint everything".
    shadow: Vec<Option<CellColors>>,
    last_cells: u64,
}

impl<W: Write> HalfBlockSurface<W> {
    /// Surface with a pixel grid of `size`, cleared to black.
    pub fn new(writer: W, size: GridSize) -> Self {
        Self {
            writer,
            size,
            pixels: vec![PackedRgb::BLACK; size.area() as usize],
            shadow: Vec::new(),
            last_cells: 0,
        }
    }

    /// Surface covering a `cols × rows` terminal.
    pub fn for_terminal(writer: W, cols: u16, rows: u16) -> Self {
        Self::new(writer, pixel_size(cols, rows))
    }

    /// Terminal cells covered: `(columns, rows)`.
    #[inline]
    pub fn cell_size(&self) -> (u32, u32) {
        (self.size.width, self.size.height.div_ceil(2))
    }

    /// Cells emitted by the most recent `present`.
    #[inline]
    pub fn last_present_cells(&self) -> u64 {
        self.last_cells
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    #[inline]
    fn pixel_or_black(&self, x: u32, y: u32) -> PackedRgb {
        let coord = PixelCoord::new(x, y);
        if !self.size.contains(coord) {
            return PackedRgb::BLACK;
        }
        self.pixels
            .get(self.size.index_of(coord) as usize)
            .copied()
            .unwrap_or(PackedRgb::BLACK)
    }
}

impl<W: Write> DisplaySurface for HalfBlockSurface<W> {
    fn size(&self) -> GridSize {
        self.size
    }

    fn resize(&mut self, size: GridSize) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area() as usize, PackedRgb::BLACK);
        self.shadow.clear();
    }

    fn write_pixel(&mut self, coord: PixelCoord, color: PackedRgb) {
        if !self.size.contains(coord) {
            return;
        }
        let idx = self.size.index_of(coord) as usize;
        if let Some(slot) = self.pixels.get_mut(idx) {
            *slot = color;
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let (cols, rows) = self.cell_size();
        let cell_count = cols as usize * rows as usize;
        if self.shadow.len() != cell_count {
            self.shadow.clear();
            self.shadow.resize(cell_count, None);
        }

        queue!(self.writer, BeginSynchronizedUpdate)?;

        let mut emitted = 0_u64;
        let mut cursor: Option<(u32, u32)> = None;
        let mut pen: Option<CellColors> = None;

        for row in 0..rows {
            for col in 0..cols {
                let colors = (
                    self.pixel_or_black(col, row * 2),
                    self.pixel_or_black(col, row * 2 + 1),
                );
                let idx = row as usize * cols as usize + col as usize;
                if self.shadow[idx] == Some(colors) {
                    continue;
                }
                if cursor != Some((col, row)) {
                    queue!(self.writer, MoveTo(col as u16, row as u16))?;
                }
                if pen.map(|p| p.0) != Some(colors.0) {
                    queue!(self.writer, SetForegroundColor(to_color(colors.0)))?;
                }
                if pen.map(|p| p.1) != Some(colors.1) {
                    queue!(self.writer, SetBackgroundColor(to_color(colors.1)))?;
                }
                queue!(self.writer, Print(HALF_BLOCK))?;
                pen = Some(colors);
                cursor = Some((col + 1, row));
                self.shadow[idx] = Some(colors);
                emitted += 1;
            }
        }

        if emitted > 0 {
            queue!(self.writer, ResetColor)?;
        }
        queue!(self.writer, EndSynchronizedUpdate)?;
        self.writer.flush()?;
        self.last_cells = emitted;
        Ok(())
    }
}
