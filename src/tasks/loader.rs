use std::path::Path;

use image::RgbaImage;
use tracing::debug;

use crate::error::Error;
use crate::meta::{orient, read_exif_orientation};
use crate::processing::{layout::fit_within, resize::resize_rgba};

/// Decode `path` to RGBA8 and turn it upright using its EXIF orientation.
///
/// Orientation is best-effort: missing or unreadable metadata leaves the pixels
/// as stored.
///
/// # Errors
/// Returns [`Error::Decode`] when the file cannot be opened or decoded.
pub fn decode_rgba8_apply_exif(path: &Path) -> Result<RgbaImage, Error> {
    let decode_err = |source| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    #[cfg(all(target_os = "macos", feature = "heic"))]
    if heif::is_heif(path) {
        // libheif applies the container's rotation and mirroring itself.
        return heif::decode_rgba8(path).map_err(decode_err);
    }
    let img = image::ImageReader::open(path)
        .map_err(|err| decode_err(image::ImageError::IoError(err)))?
        .with_guessed_format()
        .map_err(|err| decode_err(image::ImageError::IoError(err)))?
        .decode()
        .map_err(decode_err)?;

    let img = img.to_rgba8();
    let orientation = read_exif_orientation(path).unwrap_or(1);
    Ok(orient(img, orientation))
}

/// Decode, orient and scale `path` to fit a `screen_w` x `screen_h` screen.
///
/// # Errors
/// Returns [`Error::Decode`] or [`Error::Resize`].
pub fn load_for_screen(path: &Path, screen_w: u32, screen_h: u32) -> Result<RgbaImage, Error> {
    let img = decode_rgba8_apply_exif(path)?;
    let (w, h) = img.dimensions();
    let (fit_w, fit_h) = fit_within(screen_w, screen_h, w, h);
    debug!(
        path = %path.display(),
        src_w = w,
        src_h = h,
        fit_w,
        fit_h,
        "scaled to screen"
    );
    resize_rgba(&img, fit_w, fit_h)
}

#[cfg(all(target_os = "macos", feature = "heic"))]
mod heif {
    use std::path::Path;

    use image::error::{DecodingError, ImageFormatHint};
    use image::{ImageError, RgbaImage};
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    pub(super) fn is_heif(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("heic") || ext.eq_ignore_ascii_case("heif"))
    }

    fn heif_error(message: impl ToString) -> ImageError {
        ImageError::Decoding(DecodingError::new(
            ImageFormatHint::Name("HEIF".into()),
            message.to_string(),
        ))
    }

    pub(super) fn decode_rgba8(path: &Path) -> Result<RgbaImage, ImageError> {
        let path_str = path.to_str().ok_or_else(|| heif_error("path is not valid UTF-8"))?;
        let lib = LibHeif::new();
        let ctx = HeifContext::read_from_file(path_str).map_err(heif_error)?;
        let handle = ctx.primary_image_handle().map_err(heif_error)?;
        let image = lib
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgba), None)
            .map_err(heif_error)?;
        let plane = image
            .planes()
            .interleaved
            .ok_or_else(|| heif_error("no interleaved RGBA plane"))?;

        let row_len = plane.width as usize * 4;
        let mut pixels = Vec::with_capacity(row_len * plane.height as usize);
        for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
            let row = row
                .get(..row_len)
                .ok_or_else(|| heif_error("decoded row is shorter than the image width"))?;
            pixels.extend_from_slice(row);
        }
        RgbaImage::from_raw(plane.width, plane.height, pixels)
            .ok_or_else(|| heif_error("decoded plane is smaller than its dimensions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    // JPEG 2x1 with EXIF orientation 6 (rotate 90 CW), base64 encoded
    const ORIENT6_JPEG: &str = concat!(
        "/9j/4AAQSkZJRgABAQAAAQABAAD/4QAiRXhpZgAATU0AKgAAAAgAAQESAAMAAAABAAYAAAAAAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8UHRofHh0aHBwgJC4nICIsIxwcKDcpLDAxNDQ0Hyc5PTgyPC4zNDL/",
        "2wBDAQkJCQwLDBgNDRgyIRwhMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjL/wAARCAABAAIDASIAAhEBAxEB/8QAHwAAAQUBAQEBAQEAAAAAAAAAAAECAwQFBgcICQoL/8QAtRAAAgEDAwIEAwUFBAQAAAF9AQIDAAQRBRIhMUEGE1FhByJxFDKBkaEII0KxwRVS0fAkM2JyggkKFhcYGRolJicoKSo0NTY3ODk6Q0RFRkdISUpTVFVWV1hZWmNkZWZnaGlqc3R1dnd4eXqDhIWGh4iJipKTlJWWl5iZmqKjpKWmp6ipqrKztLW2t7i5usLDxMXGx8jJytLT1NXW19jZ2uHi4+Tl5ufo6erx8vP09fb3+Pn6/8QAHwEAAwEBAQEBAQEBAQAAAAAAAAECAwQFBgcICQoL/8QAtREAAgECBAQDBAcFBAQAAQJ3AAECAxEEBSExBhJBUQdhcRMiMoEIFEKRobHBCSMzUvAVYnLRChYkNOEl8RcYGRomJygpKjU2Nzg5OkNERUZHSElKU1RVVldYWVpjZGVmZ2hpanN0dXZ3eHl6goOEhYaHiImKkpOUlZaXmJmaoqOkpaanqKmqsrO0tba3uLm6wsPExcbHyMnK0tPU1dbX2Nna4uPk5ebn6Onq8vP09fb3+Pn6/9oADAMBAAIRAxEAPwDi6KKK+ZP3E//Z"
    );

    #[test]
    fn applies_orientation_six() {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(ORIENT6_JPEG)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orient6.jpg");
        std::fs::write(&path, &bytes).unwrap();
        let img = decode_rgba8_apply_exif(&path).unwrap();
        assert_eq!(img.dimensions(), (1, 2));
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            decode_rgba8_apply_exif(&path),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            decode_rgba8_apply_exif(&dir.path().join("gone.jpg")),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn load_for_screen_fits_inside_screen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::from_pixel(64, 16, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
        let img = load_for_screen(&path, 32, 32).unwrap();
        assert_eq!(img.dimensions(), (32, 8));
    }
}
