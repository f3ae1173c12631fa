use crate::parallel;
use lensmtf_image::{Image, ImageError};

/// ITU-R 601-2 luma weights in 16 bit fixed point, summing to 65536.
const RW_Q16: u32 = 19595;
const GW_Q16: u32 = 38470;
const BW_Q16: u32 = 7471;

/// Convert an RGB8 image to 8-bit luma (ITU-R 601-2) with rounding:
///
/// Y = (19595 * R + 38470 * G + 7471 * B + 2^15) >> 16
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use lensmtf_image::{Image, ImageSize};
/// use lensmtf_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![255, 0, 0]).unwrap();
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[76]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u32;
        let g = src_pixel[1] as u32;
        let b = src_pixel[2] as u32;
        dst_pixel[0] = ((r * RW_Q16 + g * GW_Q16 + b * BW_Q16 + (1 << 15)) >> 16) as u8;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use lensmtf_image::{Image, ImageError, ImageSize};

    #[test]
    fn gray_from_rgb_u8() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![
                255, 255, 255,
                0, 0, 0,
                0, 255, 0,
                0, 0, 255,
            ],
        )?;
        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::gray_from_rgb_u8(&image, &mut gray)?;

        assert_eq!(gray.as_slice(), &[255, 0, 150, 29]);

        Ok(())
    }

    #[test]
    fn gray_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;
        let mut gray = Image::<u8, 1>::from_size_val([2, 1].into(), 0)?;

        let res = super::gray_from_rgb_u8(&image, &mut gray);
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 2, 1)));

        Ok(())
    }
}
