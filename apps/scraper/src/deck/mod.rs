//! Anki `.apkg` packages: reading a previous deck and writing a new one.

pub mod error;
pub mod guid;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::DeckError;
pub use guid::guid_for;
pub use reader::{read_existing_cards, try_read_existing_cards};
pub use writer::DeckWriter;

/// Collection database names, newest first.
pub const COLLECTION_FILES: [&str; 2] = ["collection.anki21", "collection.anki2"];

/// Name the writer uses for the collection inside the package.
pub const COLLECTION_FILE: &str = "collection.anki2";

/// Anki separates note fields with the unit separator.
pub const FIELD_SEPARATOR: &str = "\x1f";
