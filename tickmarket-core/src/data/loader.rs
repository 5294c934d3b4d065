//! Price file loading.
//!
//! A market directory holds plain-text files with one price per line. The
//! market's series is every file's values concatenated, file by file.

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::FileOrder;
use crate::domain::MarketId;

/// Startup failures. Any of these means the process must not serve.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}: '{value}' is not a valid price")]
    Parse {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("market '{market}' has no prices")]
    EmptySeries { market: MarketId },
}

/// Load every regular file under `dir` into one series.
pub fn load_series(dir: &Path, order: FileOrder) -> Result<Vec<f64>, LoadError> {
    let mut prices = Vec::new();
    for path in list_files(dir, order)? {
        let file = fs::File::open(&path).map_err(|source| LoadError::ReadFile {
            path: path.clone(),
            source,
        })?;
        prices.extend(parse_prices(file, &path)?);
    }
    Ok(prices)
}

/// Parse newline-delimited prices. `path` is only used for error reporting.
pub fn parse_prices(reader: impl Read, path: &Path) -> Result<Vec<f64>, LoadError> {
    let mut prices = Vec::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|source| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let value = line.trim();
        let price = value.parse::<f64>().map_err(|_| LoadError::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            value: value.to_string(),
        })?;
        prices.push(price);
    }
    Ok(prices)
}

fn list_files(dir: &Path, order: FileOrder) -> Result<Vec<PathBuf>, LoadError> {
    let read_dir_err = |source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let file_type = entry.file_type().map_err(read_dir_err)?;
        // Symlinks are followed by File::open; only skip actual sub-directories.
        if file_type.is_dir() {
            continue;
        }
        files.push(entry.path());
    }

    if order == FileOrder::Name {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(files)
}
