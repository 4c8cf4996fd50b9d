use std::fs;

use ab_glyph::{FontArc, FontVec};
use anyhow::{Context, Result};
use fontdb::{Database, Family, Query, Source};
use tracing::{debug, warn};

/// First loadable system font among `families`, then the generic sans-serif
/// family, then any face at all. `None` leaves labels undrawn.
pub fn load_font(families: &[&str]) -> Option<FontArc> {
    let mut db = Database::new();
    db.load_system_fonts();

    let preferred = families
        .iter()
        .map(|&name| Family::Name(name))
        .chain(std::iter::once(Family::SansSerif));
    for family in preferred {
        let Some(id) = db.query(&Query {
            families: &[family],
            ..Default::default()
        }) else {
            continue;
        };
        match load_face(&db, id) {
            Ok(font) => {
                debug!(family = db.family_name(&family), "label font loaded");
                return Some(font);
            }
            Err(err) => debug!(family = db.family_name(&family), error = %err, "skipping font"),
        }
    }

    for face in db.faces() {
        if let Ok(font) = load_face(&db, face.id) {
            return Some(font);
        }
    }

    warn!("no usable system font; labels will not be drawn");
    None
}

fn load_face(db: &Database, id: fontdb::ID) -> Result<FontArc> {
    let face = db.face(id).context("missing font face in database")?;
    let bytes = match &face.source {
        Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        Source::File(path) => {
            fs::read(path).with_context(|| format!("failed to read font at {}", path.display()))?
        }
        Source::SharedFile(_, data) => data.as_ref().as_ref().to_vec(),
    };
    let font = FontVec::try_from_vec_and_index(bytes, face.index)
        .context("failed to decode font face")?;
    Ok(FontArc::new(font))
}
