//! Row and record types shared by the parsers and the merger.
//!
//! A [`RawRow`] is exactly what a parser read out of one table row. An
//! [`OpcodeRecord`] is the normalized, immutable result that the emitter and
//! the emulator consume.

use super::addressing::AddressingMode;
use super::cycles::{self, CycleAdjustment};
use super::source::Source;
use super::*;

/// Prefix the unofficial reference's mnemonics carry once they are recorded.
pub const UNOFFICIAL_PREFIX: char = '*';

/// One physical table row, still in source text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub source: Source,
    pub mnemonic: String,
    pub opcode_byte: String,
    pub addressing_label: String,
    pub size_text: String,
    pub cycle_text: String,
    /// where the row came from, for error messages ("unofficial line 412")
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeRecord {
    pub mnemonic: String,
    pub is_official: bool,
    pub opcode_byte: u8,
    pub addressing_mode: AddressingMode,
    pub size_bytes: u8,
    pub base_cycles: u8,
    pub cycle_adjustment: CycleAdjustment,
}
impl OpcodeRecord {
    /// Normalizes a raw row. Size comes from the addressing mode, never from the row.
    pub fn from_raw(row: &RawRow) -> Result<Self, Error> {
        let with_ctx = |mut e: Error| {
            e.ctx = Some(row.origin.clone());
            e
        };
        let opcode_byte = parse_opcode_byte(&row.opcode_byte).map_err(with_ctx)?;
        let addressing_mode = AddressingMode::from_label(&row.addressing_label).map_err(with_ctx)?;
        let (base_cycles, cycle_adjustment) = cycles::classify(&row.cycle_text).map_err(with_ctx)?;
        let size_bytes = addressing_mode.size();
        if row.size_text.trim().parse::<u8>().ok() != Some(size_bytes) {
            warn!(
                "{}: {} ${:02X} lists size \"{}\", using {} for {}",
                row.origin,
                row.mnemonic,
                opcode_byte,
                row.size_text.trim(),
                size_bytes,
                addressing_mode
            );
        }
        Ok(OpcodeRecord {
            mnemonic: row.mnemonic.clone(),
            is_official: row.source == Source::Official,
            opcode_byte,
            addressing_mode,
            size_bytes,
            base_cycles,
            cycle_adjustment,
        })
    }
    /// The mnemonic without the unofficial prefix.
    pub fn canonical(&self) -> &str { canonical_mnemonic(&self.mnemonic) }
}
impl fmt::Display for OpcodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "${:02X}  {:5} {:12} {:2} {:2} {:12} {}",
            self.opcode_byte,
            self.mnemonic,
            self.addressing_mode.to_string(),
            self.size_bytes,
            self.base_cycles,
            self.cycle_adjustment.to_string(),
            if self.is_official { "official" } else { "unofficial" }
        )
    }
}

pub fn canonical_mnemonic(mnemonic: &str) -> &str { mnemonic.trim_start_matches(UNOFFICIAL_PREFIX) }

/// Reads an opcode cell (`$E8`, `0xE8` or `E8`) as a byte.
pub fn parse_opcode_byte(text: &str) -> Result<u8, Error> {
    let t = text.trim();
    let digits = t
        .strip_prefix('$')
        .or_else(|| t.strip_prefix("0x"))
        .or_else(|| t.strip_prefix("0X"))
        .unwrap_or(t);
    // from_str_radix alone would take a sign ("$+F")
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::new(
            ErrorKind::MalformedOpcode,
            None,
            format!("opcode \"{}\" is not a byte", text).as_str(),
        ));
    }
    u8::from_str_radix(digits, 16).map_err(|e| {
        Error::new(
            ErrorKind::MalformedOpcode,
            None,
            format!("opcode \"{}\": {}", text, e).as_str(),
        )
    })
}
