use lensmtf_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// Rotate the input image by 90 degrees counter-clockwise.
///
/// The output has the width and height of the input swapped. The pixel at
/// `(x, y)` of the output is taken from `(W - 1 - y, x)` of the input, so the
/// rows of the output walk down the columns of the input, starting from the
/// right-most column.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The rotated image with shape (W, H, C).
///
/// # Example
///
/// ```
/// use lensmtf_image::{Image, ImageSize};
/// use lensmtf_imgproc::rotate::rotate90_ccw;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 2,
///     },
///     vec![0, 1, 2, 3, 4, 5],
/// )
/// .unwrap();
///
/// let rotated = rotate90_ccw(&image).unwrap();
///
/// assert_eq!(rotated.size().width, 2);
/// assert_eq!(rotated.size().height, 3);
/// assert_eq!(rotated.as_slice(), &[2, 5, 1, 4, 0, 3]);
/// ```
pub fn rotate90_ccw<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let (src_cols, src_rows) = (src.cols(), src.rows());
    let mut dst = Image::from_size_val(
        ImageSize {
            width: src_rows,
            height: src_cols,
        },
        T::default(),
    )?;

    let src_data = src.as_slice();
    parallel::par_fill_rows(&mut dst, |i, row| {
        let src_x = src_cols - 1 - i;
        row.chunks_exact_mut(C).enumerate().for_each(|(j, px)| {
            let offset = (j * src_cols + src_x) * C;
            px.copy_from_slice(&src_data[offset..offset + C]);
        });
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use lensmtf_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_rotate90_ccw() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![
                0u8, 1, 2,
                3u8, 4, 5,
            ],
        )?;

        let rotated = super::rotate90_ccw(&image)?;

        assert_eq!(rotated.size(), ImageSize { width: 2, height: 3 });
        #[rustfmt::skip]
        assert_eq!(rotated.as_slice(), &[
            2u8, 5,
            1u8, 4,
            0u8, 3,
        ]);

        Ok(())
    }

    #[test]
    fn test_rotate90_ccw_multichannel() -> Result<(), ImageError> {
        let image = Image::<_, 2>::new([2, 1].into(), vec![1u8, 2, 3, 4])?;

        let rotated = super::rotate90_ccw(&image)?;

        assert_eq!(rotated.size(), ImageSize { width: 1, height: 2 });
        assert_eq!(rotated.as_slice(), &[3u8, 4, 1, 2]);

        Ok(())
    }

    #[test]
    fn test_rotate_four_times_is_identity() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new([3, 2].into(), vec![0u8, 1, 2, 3, 4, 5])?;

        let mut rotated = image.clone();
        for _ in 0..4 {
            rotated = super::rotate90_ccw(&rotated)?;
        }

        assert_eq!(rotated, image);

        Ok(())
    }
}
