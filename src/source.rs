//! The two reference documents, how their text is obtained and which parser reads them.
//!
//! Downloading is left to the user (`curl -o` once per document); the
//! [`FileFetcher`] reads those local copies.

use super::official::OfficialParser;
use super::record::RawRow;
use super::unofficial::UnofficialParser;
use super::*;

use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Source {
    /// the documented instruction reference (HTML)
    Official,
    /// the undocumented opcode listing (plain text)
    Unofficial,
}
impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Official => write!(f, "official"),
            Source::Unofficial => write!(f, "unofficial"),
        }
    }
}

/// Something that can produce a reference document's raw text.
pub trait DocumentFetcher {
    fn fetch(&self, source: Source) -> Result<String, Error>;
}

/// Reads previously downloaded copies of the references from disk.
pub struct FileFetcher {
    official: PathBuf,
    unofficial: PathBuf,
}
impl FileFetcher {
    pub fn new<P: Into<PathBuf>>(official: P, unofficial: P) -> Self {
        FileFetcher {
            official: official.into(),
            unofficial: unofficial.into(),
        }
    }
    fn path(&self, source: Source) -> &PathBuf {
        match source {
            Source::Official => &self.official,
            Source::Unofficial => &self.unofficial,
        }
    }
}
impl DocumentFetcher for FileFetcher {
    fn fetch(&self, source: Source) -> Result<String, Error> {
        let path = self.path(source);
        verbose_println!("reading {} reference from {}", source, path.display());
        fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::IO,
                Some(format!("{} reference", source)),
                format!("failed to read {}: {}", path.display(), e).as_str(),
            )
        })
    }
}

/// Turns one reference document into its rows, in document order.
pub trait TableParser {
    fn parse(&self, text: &str) -> Result<Vec<RawRow>, Error>;
}

pub fn parser_for(source: Source) -> Box<dyn TableParser> {
    match source {
        Source::Official => Box::new(OfficialParser::new()),
        Source::Unofficial => Box::new(UnofficialParser::new()),
    }
}

/// Fetches a reference and parses it with the parser for that source.
pub fn load_rows(fetcher: &dyn DocumentFetcher, source: Source) -> Result<Vec<RawRow>, Error> {
    let text = fetcher.fetch(source)?;
    let rows = parser_for(source).parse(&text)?;
    info!("{} reference: {} opcode rows", source, rows.len());
    Ok(rows)
}
