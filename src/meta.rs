//! EXIF orientation lookup and the flip/rotate sequences that undo it.

use std::{fs, io::BufReader, path::Path};

use image::{RgbaImage, imageops};
use tracing::debug;

/// One lossless pixel transform. Rotations are clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    FlipHorizontal,
    FlipVertical,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Transform {
    /// The transform that undoes `self`.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::FlipHorizontal => Self::FlipHorizontal,
            Self::FlipVertical => Self::FlipVertical,
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate180 => Self::Rotate180,
            Self::Rotate270 => Self::Rotate90,
        }
    }

    #[must_use]
    pub fn apply(self, img: &RgbaImage) -> RgbaImage {
        match self {
            Self::FlipHorizontal => imageops::flip_horizontal(img),
            Self::FlipVertical => imageops::flip_vertical(img),
            Self::Rotate90 => imageops::rotate90(img),
            Self::Rotate180 => imageops::rotate180(img),
            Self::Rotate270 => imageops::rotate270(img),
        }
    }
}

/// Transforms, in order, that turn stored pixels with EXIF `orientation`
/// into an upright image. Codes 1 and unknown values need nothing.
#[must_use]
pub const fn orientation_transforms(orientation: u16) -> &'static [Transform] {
    use Transform::{FlipHorizontal, FlipVertical, Rotate90, Rotate180, Rotate270};
    match orientation {
        2 => &[FlipHorizontal],
        3 => &[Rotate180],
        4 => &[FlipVertical],
        5 => &[FlipHorizontal, Rotate270],
        6 => &[Rotate90],
        7 => &[FlipHorizontal, Rotate90],
        8 => &[Rotate270],
        _ => &[],
    }
}

/// Apply `transforms` in order.
#[must_use]
pub fn apply_transforms(img: RgbaImage, transforms: &[Transform]) -> RgbaImage {
    transforms.iter().fold(img, |img, t| t.apply(&img))
}

/// Undo `transforms` (inverse of each, in reverse order).
#[must_use]
pub fn invert_transforms(img: RgbaImage, transforms: &[Transform]) -> RgbaImage {
    transforms
        .iter()
        .rev()
        .fold(img, |img, t| t.inverse().apply(&img))
}

/// Rotate/flip `img` upright according to `orientation`.
#[must_use]
pub fn orient(img: RgbaImage, orientation: u16) -> RgbaImage {
    apply_transforms(img, orientation_transforms(orientation))
}

/// Read the primary EXIF orientation, if the container has one.
pub fn read_exif_orientation(path: &Path) -> Option<u16> {
    let f = fs::File::open(path).ok()?;
    let mut buf = BufReader::new(f);
    let reader = exif::Reader::new().read_from_container(&mut buf).ok()?;
    let field = reader.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    let value = field.value.get_uint(0)?;
    let o = u16::try_from(value).ok()?;
    debug!(orientation = o, label = exif_orientation_label(o), path = %path.display(), "exif orientation");
    Some(o)
}

#[inline]
fn exif_orientation_label(v: u16) -> &'static str {
    match v {
        1 => "Normal (1)",
        2 => "Mirrored horizontal (2)",
        3 => "Rotated 180° (3)",
        4 => "Mirrored vertical (4)",
        5 => "Mirrored horizontal + Rotated 270° (5)",
        6 => "Rotated 90° CW (6)",
        7 => "Mirrored horizontal + Rotated 90° (7)",
        8 => "Rotated 270° CW (8)",
        _ => "Unknown",
    }
}
