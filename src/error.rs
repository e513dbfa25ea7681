use std::{convert::From, fmt};

/// Simple custom Error for the scraper
pub struct Error {
    pub kind: ErrorKind,
    /// where the failure was found (source document, table, line)
    pub ctx: Option<String>,
    pub msg: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// official reference has a different number of mnemonic anchors and opcode tables
    StructureMismatch,
    /// opcode cell isn't a byte-sized hex literal
    MalformedOpcode,
    /// unofficial reference opened a table with no mnemonic heading left to claim it
    Underrun,
    /// addressing mode label missing from the mapping table
    UnknownAddressingMode,
    /// cycle cell has no leading integer
    InvalidCycleCount,
    /// two records claim the same opcode byte
    DuplicateEncoding,
    /// underlying io error
    IO,
    /// catch-all for other errors
    General,
}

impl Error {
    pub fn new(kind: ErrorKind, ctx: Option<String>, message: &str) -> Error {
        Error {
            kind,
            ctx,
            msg: String::from(message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self { Error::new(ErrorKind::IO, None, e.to_string().as_str()) }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:?}: {}", red!("opscrape::Error"), self.kind, self.msg)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some(ctx) = self.ctx.as_ref() {
            write!(f, "\nContext: {}", ctx)?;
        }
        Ok(())
    }
}
impl std::error::Error for Error {}
