//! Reading note files and discovering them under a notes root.

use crate::infra::ParseError;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors while reading or extracting notes from a file.
///
/// Every variant names the file it concerns.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("note file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },

    #[error("unsupported note format (expected .md, .yaml or .yml): {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse notes in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl ExtractError {
    /// Creates an appropriate ExtractError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => ExtractError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => ExtractError::PermissionDenied { path: path.into() },
            _ => ExtractError::Io {
                path: path.into(),
                source: error,
            },
        }
    }

    /// The file this error concerns.
    pub fn path(&self) -> &Path {
        match self {
            ExtractError::NotFound { path }
            | ExtractError::PermissionDenied { path }
            | ExtractError::Io { path, .. }
            | ExtractError::NotADirectory { path }
            | ExtractError::InvalidEncoding { path, .. }
            | ExtractError::UnsupportedFormat { path }
            | ExtractError::Parse { path, .. } => path,
        }
    }
}

/// Note file encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.yaml` / `.yml`: many notes under a `notes` key.
    Yaml,
    /// `.md`: one note in the front matter.
    Markdown,
}

impl Format {
    /// Picks the format from the path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Format::Yaml),
            "md" => Some(Format::Markdown),
            _ => None,
        }
    }
}

/// Reads a note file as UTF-8 text.
///
/// A UTF-8 byte order mark is kept, so byte offsets into the returned text
/// are offsets into the file.
///
/// # Errors
///
/// Returns `ExtractError::NotFound` / `PermissionDenied` / `Io` when the file
/// cannot be read, and `ExtractError::InvalidEncoding` when it is not UTF-8.
pub fn read_source(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractError::from_io(path, e))?;
    decode_source(bytes, path)
}

fn decode_source(bytes: Vec<u8>, path: &Path) -> Result<String, ExtractError> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(ExtractError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 byte order mark detected; convert to UTF-8".into(),
        });
    }

    String::from_utf8(bytes).map_err(|e| ExtractError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })
}

/// Finds note files (`.md`, `.yaml`, `.yml`) under `root`.
///
/// When `sub_paths` is empty the whole root is scanned; otherwise only the
/// given paths (relative to `root`, files or directories). Hidden files and
/// directories are skipped. Returns sorted, de-duplicated paths relative to
/// `root`.
///
/// # Errors
///
/// Returns `ExtractError::NotFound` if the root doesn't exist and
/// `ExtractError::NotADirectory` if it is not a directory.
pub fn scan_notes_directory(root: &Path, sub_paths: &[PathBuf]) -> Result<Vec<PathBuf>, ExtractError> {
    if !root.exists() {
        return Err(ExtractError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ExtractError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let starts: Vec<PathBuf> = if sub_paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        sub_paths.iter().map(|p| root.join(p)).collect()
    };

    let mut found = BTreeSet::new();
    for start in starts {
        let entries = WalkDir::new(&start)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| Format::from_path(e.path()).is_some());

        for entry in entries {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                found.insert(relative.to_path_buf());
            }
        }
    }

    Ok(found.into_iter().collect())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}
