//! Persistence of an [`InvertedIndex`] in one of two interchangeable formats.
//!
//! - [`IndexFormat::Text`]: a single JSON object mapping each term to its
//!   array of document ids.
//! - [`IndexFormat::Binary`]: back-to-back big-endian records, see
//!   [`binary`] for the layout.
//!
//! The format is always chosen explicitly by the caller; it is never inferred
//! from a file name.

pub mod binary;
pub mod text;

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use log::info;
use tempfile::NamedTempFile;

use crate::codec::binary::BinaryCodec;
use crate::codec::text::TextCodec;
use crate::error::{Result, TermdexError};
use crate::index::inverted::InvertedIndex;

/// A paired encoder/decoder for one on-disk representation.
pub trait IndexCodec {
    /// Write `index` to `writer`.
    fn encode(&self, index: &InvertedIndex, writer: &mut dyn Write) -> Result<()>;

    /// Read a complete index from `reader`.
    fn decode(&self, reader: &mut dyn Read) -> Result<InvertedIndex>;

    /// Encode into a fresh buffer.
    fn to_bytes(&self, index: &InvertedIndex) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(index, &mut buffer)?;
        Ok(buffer)
    }

    /// Decode from an in-memory buffer.
    fn from_bytes(&self, mut bytes: &[u8]) -> Result<InvertedIndex> {
        self.decode(&mut bytes)
    }
}

/// Supported on-disk formats.
///
/// Parsed case-insensitively from `text`/`binary`, with `json`/`struct`
/// accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// Self-describing JSON object.
    Text,
    /// Fixed-width big-endian records.
    #[default]
    Binary,
}

impl IndexFormat {
    pub fn name(&self) -> &'static str {
        match self {
            IndexFormat::Text => "text",
            IndexFormat::Binary => "binary",
        }
    }

    /// The codec bound to this format.
    pub fn codec(&self) -> &'static dyn IndexCodec {
        match self {
            IndexFormat::Text => &TextCodec,
            IndexFormat::Binary => &BinaryCodec,
        }
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndexFormat {
    type Err = TermdexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "json" => Ok(IndexFormat::Text),
            "binary" | "struct" => Ok(IndexFormat::Binary),
            other => Err(TermdexError::invalid_argument(format!(
                "Unknown index format '{other}', expected 'text' or 'binary'"
            ))),
        }
    }
}

impl InvertedIndex {
    /// Write the index to `writer` in the given format.
    pub fn save<W: Write>(&self, mut writer: W, format: IndexFormat) -> Result<()> {
        format.codec().encode(self, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read an index from `reader` in the given format.
    pub fn load<R: Read>(mut reader: R, format: IndexFormat) -> Result<InvertedIndex> {
        format.codec().decode(&mut reader)
    }

    /// Write the index to `path`.
    ///
    /// The data goes to a temporary file in the same directory first and is
    /// renamed over `path` only after encoding succeeded, so a failed encode
    /// never leaves a truncated index behind. An existing file keeps its
    /// permissions; a new one is created like `File::create` would.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P, format: IndexFormat) -> Result<()> {
        let path = path.as_ref();
        info!(
            "Saving inverted index with {} terms to {} as {format}",
            self.len(),
            path.display()
        );

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = create_temp_file(dir)?;
        if let Ok(metadata) = fs::metadata(path) {
            temp.as_file().set_permissions(metadata.permissions())?;
        }
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            self.save(&mut writer, format)?;
        }
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| TermdexError::Io(e.error))?;
        Ok(())
    }

    /// Read an index from `path`.
    pub fn load_from_path<P: AsRef<Path>>(path: P, format: IndexFormat) -> Result<InvertedIndex> {
        let path = path.as_ref();
        info!(
            "Loading inverted index from {} with format {format}",
            path.display()
        );
        let file = File::open(path)?;
        let index = Self::load(BufReader::new(file), format)?;
        info!("Loaded {} terms from {}", index.len(), path.display());
        Ok(index)
    }
}

/// Temporary file with the default mode of a newly created file (0o666 minus umask).
#[cfg(unix)]
fn create_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn create_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}
