use std::str::FromStr;

use lensmtf_image::ImageSize;
use serde::{Deserialize, Serialize};

use crate::error::SfrError;

/// A rectangular region of interest given by two opposite corners, in
/// source-image pixel coordinates.
///
/// Corners may be given in any order, as they come from a drag gesture.
/// The region covers `[x1, x2) x [y1, y2)` once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roi {
    /// x-coordinate of the first corner.
    pub x1: i64,
    /// y-coordinate of the first corner.
    pub y1: i64,
    /// x-coordinate of the second corner.
    pub x2: i64,
    /// y-coordinate of the second corner.
    pub y2: i64,
}

impl Roi {
    /// Create a region of interest from two corners.
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Return the region with `x1 <= x2` and `y1 <= y2`, swapping each axis independently.
    ///
    /// # Example
    ///
    /// ```
    /// use lensmtf_sfr::Roi;
    ///
    /// let roi = Roi::new(40, 10, 20, 30).normalized();
    /// assert_eq!(roi, Roi::new(20, 10, 40, 30));
    /// ```
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Width of the region in pixels.
    pub fn width(&self) -> u64 {
        self.x1.abs_diff(self.x2)
    }

    /// Height of the region in pixels.
    pub fn height(&self) -> u64 {
        self.y1.abs_diff(self.y2)
    }

    /// Normalize the region and check that it is a non-empty window of a frame of `size`.
    ///
    /// Returns the top-left corner and the size of the window.
    pub fn crop_window(&self, size: ImageSize) -> Result<(usize, usize, ImageSize), SfrError> {
        let roi = self.normalized();

        if roi.width() == 0 || roi.height() == 0 {
            return Err(SfrError::InvalidRoi {
                roi,
                reason: "zero width or height",
            });
        }

        let out_of_bounds = || SfrError::RoiOutOfBounds { roi, size };
        let x1 = usize::try_from(roi.x1).map_err(|_| out_of_bounds())?;
        let y1 = usize::try_from(roi.y1).map_err(|_| out_of_bounds())?;
        let x2 = usize::try_from(roi.x2).map_err(|_| out_of_bounds())?;
        let y2 = usize::try_from(roi.y2).map_err(|_| out_of_bounds())?;

        if x2 > size.width || y2 > size.height {
            return Err(out_of_bounds());
        }

        Ok((
            x1,
            y1,
            ImageSize {
                width: x2 - x1,
                height: y2 - y1,
            },
        ))
    }
}

impl std::fmt::Display for Roi {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

impl From<(i64, i64, i64, i64)> for Roi {
    fn from((x1, y1, x2, y2): (i64, i64, i64, i64)) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl FromStr for Roi {
    type Err = SfrError;

    /// Parse a region from `"x1,y1,x2,y2"`; whitespace around the numbers is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = s
            .split(',')
            .map(|v| v.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| SfrError::RoiParse(s.to_string()))?;

        match coords.as_slice() {
            [x1, y1, x2, y2] => Ok(Self::new(*x1, *y1, *x2, *y2)),
            _ => Err(SfrError::RoiParse(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_reversed_corners() {
        let ordered = Roi::new(10, 20, 50, 60);
        assert_eq!(Roi::new(50, 60, 10, 20).normalized(), ordered);
        assert_eq!(Roi::new(50, 20, 10, 60).normalized(), ordered);
        assert_eq!(Roi::new(10, 60, 50, 20).normalized(), ordered);
        assert_eq!(ordered.normalized(), ordered);
    }

    #[test]
    fn test_crop_window() -> Result<(), SfrError> {
        let size = ImageSize {
            width: 100,
            height: 80,
        };
        let (x, y, window) = Roi::new(90, 70, 10, 5).crop_window(size)?;
        assert_eq!((x, y), (10, 5));
        assert_eq!(
            window,
            ImageSize {
                width: 80,
                height: 65
            }
        );

        // touching the far border is fine, the far edge is exclusive
        let (_, _, window) = Roi::new(0, 0, 100, 80).crop_window(size)?;
        assert_eq!(window, size);
        Ok(())
    }

    #[test]
    fn test_crop_window_empty() {
        let size = ImageSize {
            width: 100,
            height: 80,
        };
        let res = Roi::new(10, 10, 10, 40).crop_window(size);
        assert!(matches!(res, Err(SfrError::InvalidRoi { .. })));
        assert!(res.is_err_and(|e| e.is_invalid_roi()));
    }

    #[test]
    fn test_crop_window_out_of_bounds() {
        let size = ImageSize {
            width: 100,
            height: 80,
        };
        for roi in [
            Roi::new(-1, 0, 10, 10),
            Roi::new(0, 0, 101, 10),
            Roi::new(0, 0, 10, 81),
        ] {
            let res = roi.crop_window(size);
            assert!(matches!(res, Err(SfrError::RoiOutOfBounds { .. })), "{roi}");
        }
    }

    #[test]
    fn test_parse_roi() -> Result<(), SfrError> {
        assert_eq!("1,2,3,4".parse::<Roi>()?, Roi::new(1, 2, 3, 4));
        assert_eq!(" 10, 20 ,-3,4 ".parse::<Roi>()?, Roi::new(10, 20, -3, 4));
        assert!(matches!("1,2,3".parse::<Roi>(), Err(SfrError::RoiParse(_))));
        assert!(matches!("1,2,a,4".parse::<Roi>(), Err(SfrError::RoiParse(_))));
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(Roi::from((1, 2, 3, 4)).to_string(), "(1, 2, 3, 4)");
    }
}
