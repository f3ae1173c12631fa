use lensmtf_image::{Image, ImageSize};
use lensmtf_imgproc::{color::gray_from_rgb_u8, crop::crop_image, rotate::rotate90_ccw};

use crate::config::EdgeOrientation;
use crate::error::SfrError;
use crate::roi::Roi;

/// A grayscale patch ready for edge analysis: the transition runs along its rows.
pub type Patch = Image<f64, 1>;

/// A frame that regions of interest can be cut from.
///
/// Implemented for single-channel images of any sample type convertible to
/// `f64`, and for RGB8 frames, which are reduced to luma after cropping.
pub trait PatchSource: Sync {
    /// Size of the frame in pixels.
    fn frame_size(&self) -> ImageSize;

    /// Crop `roi`, convert to luminance and orient the crop so the edge
    /// transition lies along the rows.
    fn prepare_patch(&self, roi: Roi, orientation: EdgeOrientation) -> Result<Patch, SfrError>;
}

impl<T> PatchSource for Image<T, 1>
where
    T: Copy + Default + Into<f64> + Send + Sync,
{
    fn frame_size(&self) -> ImageSize {
        self.size()
    }

    fn prepare_patch(&self, roi: Roi, orientation: EdgeOrientation) -> Result<Patch, SfrError> {
        let (x, y, size) = roi.crop_window(self.size())?;
        let mut crop = Image::from_size_val(size, T::default())?;
        crop_image(self, &mut crop, x, y)?;
        orient(crop, orientation)
    }
}

impl PatchSource for Image<u8, 3> {
    fn frame_size(&self) -> ImageSize {
        self.size()
    }

    fn prepare_patch(&self, roi: Roi, orientation: EdgeOrientation) -> Result<Patch, SfrError> {
        let (x, y, size) = roi.crop_window(self.size())?;
        let mut crop = Image::from_size_val(size, 0u8)?;
        crop_image(self, &mut crop, x, y)?;

        let mut gray = Image::from_size_val(size, 0u8)?;
        gray_from_rgb_u8(&crop, &mut gray)?;
        orient(gray, orientation)
    }
}

/// Rotate (if needed) and widen a single-channel crop into a [`Patch`].
fn orient<T>(crop: Image<T, 1>, orientation: EdgeOrientation) -> Result<Patch, SfrError>
where
    T: Copy + Default + Into<f64> + Send + Sync,
{
    let oriented = match orientation {
        EdgeOrientation::Horizontal => rotate90_ccw(&crop)?,
        EdgeOrientation::Vertical => crop,
    };

    let size = oriented.size();
    let data = oriented.into_vec().into_iter().map(Into::into).collect();
    Ok(Image::new(size, data)?)
}

/// Check that a prepared patch can host the edge analysis.
pub(crate) fn ensure_patch_size(patch: &Patch) -> Result<(), SfrError> {
    if patch.cols() < 2 || patch.rows() < 2 {
        return Err(SfrError::PatchTooSmall(patch.size()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lensmtf_image::ImageError;

    fn frame() -> Result<Image<u8, 1>, ImageError> {
        #[rustfmt::skip]
        let frame = Image::new(
            ImageSize {
                width: 4,
                height: 3,
            },
            vec![
                0u8, 1, 2, 3,
                4u8, 5, 6, 7,
                8u8, 9, 10, 11,
            ],
        )?;
        Ok(frame)
    }

    #[test]
    fn test_prepare_vertical() -> Result<(), SfrError> {
        let patch = frame()?.prepare_patch(Roi::new(1, 0, 3, 2), EdgeOrientation::Vertical)?;
        assert_eq!(
            patch.size(),
            ImageSize {
                width: 2,
                height: 2
            }
        );
        assert_eq!(patch.as_slice(), &[1.0, 2.0, 5.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_prepare_horizontal_rotates() -> Result<(), SfrError> {
        let patch = frame()?.prepare_patch(Roi::new(3, 3, 0, 0), EdgeOrientation::Horizontal)?;
        assert_eq!(
            patch.size(),
            ImageSize {
                width: 3,
                height: 3
            }
        );
        #[rustfmt::skip]
        assert_eq!(patch.as_slice(), &[
            2.0, 6.0, 10.0,
            1.0, 5.0, 9.0,
            0.0, 4.0, 8.0,
        ]);
        Ok(())
    }

    #[test]
    fn test_prepare_corner_order_irrelevant() -> Result<(), SfrError> {
        let frame = frame()?;
        let a = frame.prepare_patch(Roi::new(0, 0, 3, 2), EdgeOrientation::Horizontal)?;
        let b = frame.prepare_patch(Roi::new(3, 2, 0, 0), EdgeOrientation::Horizontal)?;
        let c = frame.prepare_patch(Roi::new(0, 2, 3, 0), EdgeOrientation::Horizontal)?;
        assert_eq!(a, b);
        assert_eq!(a, c);
        Ok(())
    }

    #[test]
    fn test_prepare_rgb8() -> Result<(), SfrError> {
        let frame = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![255, 255, 255, 0, 255, 0],
        )?;
        let patch = frame.prepare_patch(Roi::new(0, 0, 2, 1), EdgeOrientation::Vertical)?;
        assert_eq!(patch.as_slice(), &[255.0, 150.0]);
        Ok(())
    }

    #[test]
    fn test_prepare_out_of_bounds() -> Result<(), SfrError> {
        let res = frame()?.prepare_patch(Roi::new(0, 0, 5, 2), EdgeOrientation::Vertical);
        assert!(matches!(res, Err(SfrError::RoiOutOfBounds { .. })));
        Ok(())
    }

    #[test]
    fn test_patch_size_check() -> Result<(), SfrError> {
        let patch = frame()?.prepare_patch(Roi::new(0, 0, 4, 1), EdgeOrientation::Vertical)?;
        assert_eq!(
            ensure_patch_size(&patch),
            Err(SfrError::PatchTooSmall(ImageSize {
                width: 4,
                height: 1
            }))
        );
        Ok(())
    }
}
