//! Writes cards into a fresh `.apkg` package.

use super::error::DeckError;
use super::guid::guid_for;
use super::schema::{collection_conf, deck_conf, deck_json, SCHEMA, SCHEMA_VERSION};
use super::{COLLECTION_FILE, FIELD_SEPARATOR};
use crate::templates::model_json;
use cgw_core::{CardRecord, ScrapeConfig, TemplateKind};
use chrono::Utc;
use rusqlite::{params, Connection, Transaction};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

type Result<T> = std::result::Result<T, DeckError>;

/// Anki's built-in default deck always exists alongside ours.
const DEFAULT_DECK_ID: i64 = 1;

/// Serializes cards into an Anki package for one configured deck.
pub struct DeckWriter {
    deck_id: i64,
    deck_name: String,
}

impl DeckWriter {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            deck_id: config.deck_id,
            deck_name: config.deck_name.clone(),
        }
    }

    /// Write `cards` to `output`, replacing any file already there.
    pub fn write(&self, cards: &[CardRecord], output: &Path) -> Result<()> {
        let scratch = tempfile::tempdir()?;
        let db_path = scratch.path().join(COLLECTION_FILE);

        let mut conn = Connection::open(&db_path)?;
        let notes = self.populate(&mut conn, cards)?;
        conn.close().map_err(|(_, e)| e)?;

        let collection = fs::read(&db_path)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut zip = ZipWriter::new(File::create(output)?);
        let options = SimpleFileOptions::default();
        zip.start_file(COLLECTION_FILE, options)?;
        zip.write_all(&collection)?;
        zip.start_file("media", options)?;
        zip.write_all(b"{}")?;
        zip.finish()?;

        info!("Wrote {} notes to {}", notes, output.display());
        Ok(())
    }

    /// Create the collection and insert one note and card per distinct hanzi.
    /// Returns the number of notes written.
    fn populate(&self, conn: &mut Connection, cards: &[CardRecord]) -> Result<usize> {
        let now = Utc::now();
        let now_secs = now.timestamp();
        let base_id = now.timestamp_millis();

        conn.execute_batch(SCHEMA)?;
        let tx = conn.transaction()?;
        self.insert_collection(&tx, now_secs, base_id)?;

        let notes = dedup_by_guid(cards);
        for (position, (guid, card)) in notes.iter().enumerate() {
            let id = base_id + position as i64;
            insert_note(&tx, id, guid, card, now_secs)?;
            tx.execute(
                "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor, reps, lapses, left, odue, odid, flags, data)
                 VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, ?5, 0, 0, 0, 0, 0, 0, 0, 0, '')",
                params![id, id, self.deck_id, now_secs, position as i64],
            )?;
        }

        tx.commit()?;
        Ok(notes.len())
    }

    fn insert_collection(&self, tx: &Transaction<'_>, now_secs: i64, now_millis: i64) -> Result<()> {
        let mut models = Map::new();
        for kind in TemplateKind::ALL {
            models.insert(
                kind.model_id().to_string(),
                model_json(kind, self.deck_id, now_secs),
            );
        }

        let mut decks = Map::new();
        decks.insert(
            DEFAULT_DECK_ID.to_string(),
            deck_json(DEFAULT_DECK_ID, "Default", now_secs),
        );
        decks.insert(
            self.deck_id.to_string(),
            deck_json(self.deck_id, &self.deck_name, now_secs),
        );

        tx.execute(
            "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
             VALUES (1, ?1, ?2, ?2, ?3, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
            params![
                now_secs,
                now_millis,
                SCHEMA_VERSION,
                collection_conf(self.deck_id).to_string(),
                Value::Object(models).to_string(),
                Value::Object(decks).to_string(),
                deck_conf().to_string(),
            ],
        )?;
        Ok(())
    }
}

fn insert_note(tx: &Transaction<'_>, id: i64, guid: &str, card: &CardRecord, now_secs: i64) -> Result<()> {
    let flds = card.fields().join(FIELD_SEPARATOR);
    tx.execute(
        "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
         VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
        params![
            id,
            guid,
            card.template_kind.model_id(),
            now_secs,
            flds,
            card.hanzi,
            field_checksum(&card.hanzi),
        ],
    )?;
    Ok(())
}

/// Collapse cards sharing a GUID. The note keeps the position of the first
/// occurrence and the content of the last.
fn dedup_by_guid(cards: &[CardRecord]) -> Vec<(String, &CardRecord)> {
    let mut notes: Vec<(String, &CardRecord)> = Vec::with_capacity(cards.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for card in cards {
        let guid = guid_for(&card.hanzi);
        match index.get(&guid) {
            Some(&at) => {
                debug!("Duplicate hanzi {:?}, keeping the later card", card.hanzi);
                notes[at].1 = card;
            }
            None => {
                index.insert(guid.clone(), notes.len());
                notes.push((guid, card));
            }
        }
    }

    notes
}

/// Duplicate-detection checksum over the sort field: the first 4 bytes of a
/// digest, read big-endian.
///
/// Anki itself takes SHA-1 over the HTML-stripped sort field. This uses
/// SHA-256 over the trimmed field, so Anki's duplicate check will not pair
/// these notes with ones another tool wrote for the same hanzi. Notes from
/// this writer still match each other across runs.
fn field_checksum(sort_field: &str) -> i64 {
    let digest = Sha256::digest(sort_field.trim().as_bytes());
    let mut prefix = [0u8; 4];
    prefix.copy_from_slice(&digest[..4]);
    i64::from(u32::from_be_bytes(prefix))
}
