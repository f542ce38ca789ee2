//! Reads the hanzi, pinyin and translation of every note in an existing package.

use super::error::DeckError;
use super::{COLLECTION_FILES, FIELD_SEPARATOR};
use cgw_core::{ExistingCardSnapshot, ExistingCards};
use rusqlite::{Connection, OpenFlags};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zip::result::ZipError;
use zip::ZipArchive;

/// Snapshot every note of the deck at `path`, keyed by hanzi.
///
/// A missing or unreadable deck is logged and treated as empty.
pub fn read_existing_cards(path: &Path) -> ExistingCards {
    if !path.exists() {
        warn!("Could not find existing deck: {}", path.display());
        return ExistingCards::new();
    }

    info!("Reading existing deck: {}...", path.display());
    match try_read_existing_cards(path) {
        Ok(cards) => {
            info!("Fetched {} notes from existing deck.", cards.len());
            cards
        }
        Err(e) => {
            warn!("Could not read deck ({}). Proceeding as if deck is empty.", e);
            ExistingCards::new()
        }
    }
}

/// Like [`read_existing_cards`], but surfaces the failure.
pub fn try_read_existing_cards(path: &Path) -> Result<ExistingCards, DeckError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let scratch = tempfile::tempdir()?;
    let db_path = extract_collection(&mut archive, scratch.path(), path)?;

    let conn = Connection::open_with_flags(&db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut stmt = conn.prepare("SELECT flds FROM notes")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut cards = ExistingCards::new();
    for flds in rows {
        let (hanzi, snapshot) = snapshot_from_fields(&flds?);
        cards.insert(hanzi, snapshot);
    }
    Ok(cards)
}

fn extract_collection(
    archive: &mut ZipArchive<File>,
    dir: &Path,
    package: &Path,
) -> Result<PathBuf, DeckError> {
    for name in COLLECTION_FILES {
        match archive.by_name(name) {
            Ok(mut entry) => {
                let target = dir.join(name);
                io::copy(&mut entry, &mut File::create(&target)?)?;
                return Ok(target);
            }
            Err(ZipError::FileNotFound) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(DeckError::MissingCollection(package.to_path_buf()))
}

/// Field 0 is the hanzi key, 1 the pinyin, 2 the translation.
fn snapshot_from_fields(flds: &str) -> (String, ExistingCardSnapshot) {
    let mut fields = flds.split(FIELD_SEPARATOR);
    let hanzi = fields.next().unwrap_or_default().trim().to_string();
    let pinyin = fields.next().unwrap_or_default().to_string();
    let translation = fields.next().unwrap_or_default().to_string();
    (hanzi, ExistingCardSnapshot { pinyin, translation })
}
