//! Canonical addressing modes and the label table used to normalize what the
//! two references print in their "Addressing Mode" columns.
//!
//! Both references spell the same modes slightly differently (`Zero Page,X`,
//! `Zero  Page,X`, `ZeroPage,X`) so every label is stripped of whitespace before
//! it is looked up. A label missing from the table stops the run.

use super::*;
use lazy_static::lazy_static;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(non_camel_case_types)]
pub enum AddressingMode {
    Accumulator,
    Absolute,
    Absolute_X,
    Absolute_Y,
    ZeroPage,
    ZeroPage_X,
    ZeroPage_Y,
    Immediate,
    Relative,
    Implied,
    Indirect,
    Indirect_X,
    Indirect_Y,
}

lazy_static! {
    /// Whitespace-free source label -> canonical mode.
    static ref MODE_BY_LABEL: HashMap<&'static str, AddressingMode> = HashMap::from([
        ("Accumulator", AddressingMode::Accumulator),
        ("Absolute", AddressingMode::Absolute),
        ("Absolute,X", AddressingMode::Absolute_X),
        ("Absolute,Y", AddressingMode::Absolute_Y),
        ("ZeroPage", AddressingMode::ZeroPage),
        ("ZeroPage,X", AddressingMode::ZeroPage_X),
        ("ZeroPage,Y", AddressingMode::ZeroPage_Y),
        ("Immediate", AddressingMode::Immediate),
        ("Relative", AddressingMode::Relative),
        ("Implied", AddressingMode::Implied),
        ("Indirect", AddressingMode::Indirect),
        ("(Indirect,X)", AddressingMode::Indirect_X),
        ("(Indirect),Y", AddressingMode::Indirect_Y),
    ]);
}

impl AddressingMode {
    /// Maps a raw label from either reference to its canonical mode.
    pub fn from_label(label: &str) -> Result<AddressingMode, Error> {
        let key: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        MODE_BY_LABEL.get(key.as_str()).copied().ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownAddressingMode,
                None,
                format!("unknown addressing mode \"{}\"", label).as_str(),
            )
        })
    }
    /// Encoded instruction size in bytes (opcode plus operand). This is the only
    /// size the scraper trusts; the references' own size columns are not consistent.
    pub fn size(&self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPage_X
            | AddressingMode::ZeroPage_Y
            | AddressingMode::Relative
            | AddressingMode::Indirect_X
            | AddressingMode::Indirect_Y => 2,
            AddressingMode::Absolute
            | AddressingMode::Absolute_X
            | AddressingMode::Absolute_Y
            | AddressingMode::Indirect => 3,
        }
    }
}
impl fmt::Display for AddressingMode {
    // the Debug form is the variant name the emulator's enum uses
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{:?}", self) }
}
