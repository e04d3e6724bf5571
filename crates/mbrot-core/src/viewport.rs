#![forbid(unsafe_code)]

//! Complex-plane viewport and the pixel → point mapping.

use num_complex::Complex64;

use crate::config::{ConfigError, parse_finite};
use crate::grid::{GridSize, PixelCoord};

/// Real bounds `(xa, xb, ya, yb)` of the complex-plane rectangle shown on the
/// surface. `xa`/`ya` map to the top-left pixel.
///
/// Fixed for the lifetime of a renderer; resizing changes how many pixels
/// cover the rectangle, never the rectangle itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub xa: f64,
    pub xb: f64,
    pub ya: f64,
    pub yb: f64,
}

impl Viewport {
    /// The whole Mandelbrot set at a 16:9 aspect.
    pub const DEFAULT: Self = Self::new(-2.0, 2.0, -1.125, 1.125);

    #[inline]
    pub const fn new(xa: f64, xb: f64, ya: f64, yb: f64) -> Self {
        Self { xa, xb, ya, yb }
    }

    /// Parse `"xa,xb,ya,yb"`.
    ///
    /// # Errors
    ///
    /// Fails on a component count other than four, unparsable or non-finite
    /// components, or a zero-extent axis.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() != 4 {
            return Err(ConfigError::ViewportArity { found: parts.len() });
        }
        let xa = parse_finite("viewport xa", parts[0])?;
        let xb = parse_finite("viewport xb", parts[1])?;
        let ya = parse_finite("viewport ya", parts[2])?;
        let yb = parse_finite("viewport yb", parts[3])?;
        if xa == xb {
            return Err(ConfigError::DegenerateViewport { axis: 'x' });
        }
        if ya == yb {
            return Err(ConfigError::DegenerateViewport { axis: 'y' });
        }
        Ok(Self::new(xa, xb, ya, yb))
    }

    /// Map a pixel to its complex point:
    /// `re = x*(xb-xa)/width + xa`, `im = y*(yb-ya)/height + ya`.
    ///
    /// `size` must be non-empty; the renderer clamps sizes to at least 1×1.
    #[inline]
    pub fn to_complex(&self, coord: PixelCoord, size: GridSize) -> Complex64 {
        debug_assert!(!size.is_empty());
        let re = f64::from(coord.x) * (self.xb - self.xa) / f64::from(size.width) + self.xa;
        let im = f64::from(coord.y) * (self.yb - self.ya) / f64::from(size.height) + self.ya;
        Complex64::new(re, im)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_pixel_maps_to_lower_bounds() {
        let vp = Viewport::DEFAULT;
        let z = vp.to_complex(PixelCoord::ORIGIN, GridSize::new(320, 180));
        assert_eq!(z, Complex64::new(-2.0, -1.125));
    }

    #[test]
    fn far_corner_approaches_upper_bounds() {
        let vp = Viewport::DEFAULT;
        let size = GridSize::new(400, 225);
        let z = vp.to_complex(PixelCoord::new(399, 224), size);
        // One pixel short of the bound.
        assert!((z.re - (2.0 - 4.0 / 400.0)).abs() < 1e-12);
        assert!((z.im - (1.125 - 2.25 / 225.0)).abs() < 1e-12);
    }

    #[test]
    fn center_pixel_maps_to_origin_for_even_grid() {
        let vp = Viewport::DEFAULT;
        let z = vp.to_complex(PixelCoord::new(160, 90), GridSize::new(320, 180));
        assert!(z.re.abs() < 1e-12);
        assert!(z.im.abs() < 1e-12);
    }

    #[test]
    fn inverted_bounds_flip_the_axis() {
        let vp = Viewport::new(1.0, -1.0, 0.0, 1.0);
        let z = vp.to_complex(PixelCoord::new(1, 0), GridSize::new(2, 1));
        assert_eq!(z.re, 0.0);
        let z = vp.to_complex(PixelCoord::ORIGIN, GridSize::new(2, 1));
        assert_eq!(z.re, 1.0);
    }

    #[test]
    fn parse_round_trips_default() {
        assert_eq!(Viewport::parse("-2,2,-1.125,1.125"), Ok(Viewport::DEFAULT));
        assert_eq!(
            Viewport::parse(" -2 , 2 , -1.125 , 1.125 "),
            Ok(Viewport::DEFAULT)
        );
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert_eq!(
            Viewport::parse("1,2,3"),
            Err(ConfigError::ViewportArity { found: 3 })
        );
        assert_eq!(
            Viewport::parse("1,1,0,2"),
            Err(ConfigError::DegenerateViewport { axis: 'x' })
        );
        assert_eq!(
            Viewport::parse("0,1,2,2"),
            Err(ConfigError::DegenerateViewport { axis: 'y' })
        );
        assert!(matches!(
            Viewport::parse("0,1,a,2"),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }
}
