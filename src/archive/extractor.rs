//! ZIP text extraction
//!
//! Archives are parsed from a fully-buffered body through the central
//! directory. Members are scanned in container order and the first one with
//! a text extension wins.

use crate::config::ArchiveConfig;
use crate::ArchiveError;
use encoding_rs::{Encoding, SHIFT_JIS};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Extracts plain text from archive bytes
#[derive(Debug, Clone)]
pub struct TextExtractor {
    text_extensions: Vec<String>,
    fallback: &'static Encoding,
}

impl TextExtractor {
    /// Creates an extractor from the archive configuration
    ///
    /// An unknown fallback label falls back to Shift_JIS; configuration
    /// validation rejects such labels before this point.
    pub fn new(config: &ArchiveConfig) -> Self {
        let fallback = Encoding::for_label(config.fallback_encoding.as_bytes()).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown encoding '{}', using Shift_JIS",
                config.fallback_encoding
            );
            SHIFT_JIS
        });

        Self {
            text_extensions: config.text_extensions.clone(),
            fallback,
        }
    }

    /// Returns the decoded content of the first text member in `bytes`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Content of the first member with a text extension
    /// * `Err(ArchiveError::Malformed)` - The bytes are not a readable ZIP container
    /// * `Err(ArchiveError::NoTextMember)` - No member has a text extension
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String, ArchiveError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ArchiveError::Malformed(e.to_string()))?;

        for index in 0..archive.len() {
            let mut member = archive
                .by_index(index)
                .map_err(|e| ArchiveError::Malformed(e.to_string()))?;

            if member.is_dir() || !self.is_text_member(member.name()) {
                tracing::debug!("Skipping archive member {}", member.name());
                continue;
            }

            let name = member.name().to_string();
            tracing::debug!("Extracting archive member {}", name);

            let mut content = Vec::with_capacity(capacity_hint(member.size()));
            member
                .read_to_end(&mut content)
                .map_err(|e| ArchiveError::Malformed(format!("{}: {}", name, e)))?;

            return Ok(self.decode(&content));
        }

        Err(ArchiveError::NoTextMember)
    }

    /// Checks the extension of the member's last path component
    fn is_text_member(&self, name: &str) -> bool {
        match member_extension(name) {
            Some(ext) => self.text_extensions.iter().any(|e| e == ext),
            None => false,
        }
    }

    /// Decodes member bytes, preferring UTF-8 and falling back to the legacy encoding
    fn decode(&self, content: &[u8]) -> String {
        let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);

        match std::str::from_utf8(content) {
            Ok(text) => text.to_string(),
            Err(_) => {
                let (text, _, had_errors) = self.fallback.decode(content);
                if had_errors {
                    tracing::warn!(
                        "Text member contained bytes invalid in {}",
                        self.fallback.name()
                    );
                }
                text.into_owned()
            }
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(&ArchiveConfig::default())
    }
}

/// Returns the extension of the last path component, including the dot
///
/// `aozora/work.txt` yields `.txt`; `README` and `dir.d/README` yield nothing.
fn member_extension(name: &str) -> Option<&str> {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    file_name.rfind('.').map(|idx| &file_name[idx..])
}

/// Upper bound on the buffer reserved up front for one member
const MAX_PREALLOCATION: usize = 8 * 1024 * 1024;

/// Buffer size to reserve for a member declaring `declared` bytes
///
/// The declared size comes from the container and is not trusted.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared)
        .unwrap_or(MAX_PREALLOCATION)
        .min(MAX_PREALLOCATION)
}

/// Extracts text with the default configuration (`.txt`, Shift_JIS fallback)
pub fn extract_text(bytes: &[u8]) -> Result<String, ArchiveError> {
    TextExtractor::default().extract_text(bytes)
}
