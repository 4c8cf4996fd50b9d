use fast_image_resize as fir;
use image::RgbaImage;

use crate::error::Error;

/// Resample `source` to exactly `target_w` x `target_h` with a Lanczos3 kernel.
///
/// # Errors
/// Returns [`Error::Resize`] for zero target dimensions or a failed resample.
pub fn resize_rgba(source: &RgbaImage, target_w: u32, target_h: u32) -> Result<RgbaImage, Error> {
    if target_w == 0 || target_h == 0 {
        return Err(Error::Resize("resize dimensions must be positive".into()));
    }
    if source.width() == target_w && source.height() == target_h {
        return Ok(source.clone());
    }

    let src_view = fir::images::ImageRef::new(
        source.width(),
        source.height(),
        source.as_raw(),
        fir::PixelType::U8x4,
    )
    .map_err(|err| Error::Resize(format!("invalid source view: {err}")))?;
    let mut dst_image = fir::images::Image::new(target_w, target_h, fir::PixelType::U8x4);
    let options = fir::ResizeOptions::new()
        .resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::Lanczos3));
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_view, &mut dst_image, Some(&options))
        .map_err(|err| Error::Resize(err.to_string()))?;
    let buffer = dst_image.into_vec();
    RgbaImage::from_raw(target_w, target_h, buffer)
        .ok_or_else(|| Error::Resize("failed to construct resized RGBA image".into()))
}
