//! Parser for the official instruction reference.
//!
//! The page is laid out as:
//!
//! 1. an index table linking to every instruction
//! 2. per instruction, an `<h3>` holding `<a name="MNEMONIC">`, a processor
//!    status table, then the opcode table
//!
//! The opcode table's first row is a header; the rest read
//! `Addressing Mode | Opcode | Bytes | Cycles`.

use super::record::{self, RawRow};
use super::source::{Source, TableParser};
use super::*;

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref SEL_ANCHOR: Selector = Selector::parse("h3 a[name]").expect("anchor selector");
    static ref SEL_TABLE: Selector = Selector::parse("table").expect("table selector");
    static ref SEL_ROW: Selector = Selector::parse("tr").expect("row selector");
    static ref SEL_CELL: Selector = Selector::parse("td, th").expect("cell selector");
}

const CONTEXT: &str = "official reference";

pub struct OfficialParser {}
impl OfficialParser {
    pub fn new() -> Self { OfficialParser {} }

    /// Mnemonics in document order, taken from the `name` attribute of each heading anchor.
    fn mnemonics(doc: &Html) -> Vec<String> {
        doc.select(&SEL_ANCHOR)
            .filter_map(|a| a.value().attr("name"))
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
    /// Opcode tables in document order: the index table goes, then every other
    /// table starting with the first (the status tables).
    fn opcode_tables(doc: &Html) -> Vec<ElementRef<'_>> {
        doc.select(&SEL_TABLE)
            .skip(1)
            .enumerate()
            .filter(|(i, _)| i % 2 == 1)
            .map(|(_, t)| t)
            .collect()
    }
    fn cell_text(cell: ElementRef) -> String {
        let text: String = cell.text().collect();
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
impl TableParser for OfficialParser {
    fn parse(&self, text: &str) -> Result<Vec<RawRow>, Error> {
        let doc = Html::parse_document(text);
        let mnemonics = OfficialParser::mnemonics(&doc);
        let tables = OfficialParser::opcode_tables(&doc);
        if mnemonics.len() != tables.len() {
            return Err(source_err!(
                ErrorKind::StructureMismatch,
                CONTEXT,
                "found {} mnemonic anchors but {} opcode tables",
                mnemonics.len(),
                tables.len()
            ));
        }
        verbose_println!("{}: {} mnemonics", CONTEXT, mnemonics.len());
        let mut rows = Vec::new();
        for (mnemonic, table) in mnemonics.iter().zip(tables) {
            // the first row is the column header
            for (row_num, tr) in table.select(&SEL_ROW).enumerate().skip(1) {
                let origin = format!("{} table {} row {}", CONTEXT, mnemonic, row_num + 1);
                let cells: Vec<String> = tr.select(&SEL_CELL).map(OfficialParser::cell_text).collect();
                if cells.len() < 4 {
                    return Err(source_err!(
                        ErrorKind::StructureMismatch,
                        origin,
                        "expected 4 columns, found {}",
                        cells.len()
                    ));
                }
                // reject bad opcode cells here so the error points at the table row
                record::parse_opcode_byte(&cells[1]).map_err(|mut e| {
                    e.ctx = Some(origin.clone());
                    e
                })?;
                rows.push(RawRow {
                    source: Source::Official,
                    mnemonic: mnemonic.clone(),
                    addressing_label: cells[0].clone(),
                    opcode_byte: cells[1].clone(),
                    size_text: cells[2].clone(),
                    cycle_text: cells[3].clone(),
                    origin,
                });
            }
        }
        Ok(rows)
    }
}
