//! Parser for the undocumented opcode listing.
//!
//! The listing is plain text. Each instruction looks like:
//! ```text
//! DOP (NOP) [SKB]
//! ===============
//! No operation (double NOP). The argument has no significance.
//!
//! Addressing  |Mnemonics  |Opc|Sz | n
//! ------------|-----------|---|---|---
//! Zero Page   |DOP arg    |$04| 2 | 3
//! Zero Page,X |DOP arg,X  |$14| 2 | 4
//! ```
//! There is no markup tying a table to its heading, so parsing takes two passes:
//! first collect every underlined heading's 3-letter mnemonic, then walk the
//! lines and hand the next unclaimed mnemonic to each table as it starts.

use super::record::{RawRow, UNOFFICIAL_PREFIX};
use super::source::{Source, TableParser};
use super::*;

use regex::Regex;

const CONTEXT: &str = "unofficial reference";

pub struct UnofficialParser {
    re_underline: Regex, // a heading's underline
    re_heading: Regex,   // mnemonic at the start of a heading line
    re_dash_rule: Regex, // column separator under a table header
}
impl UnofficialParser {
    pub fn new() -> Self {
        UnofficialParser {
            re_underline: Regex::new(r"^={3,}\s*$").unwrap(),
            re_heading: Regex::new(r"^([A-Z0-9]{3})(?:[^A-Za-z0-9]|$)").unwrap(),
            re_dash_rule: Regex::new(r"^[\s|]*-[\s|-]*$").unwrap(),
        }
    }
    /// Mnemonics of every underlined heading, in document order.
    fn mnemonics(&self, lines: &[&str]) -> Vec<String> {
        lines
            .windows(2)
            .filter(|w| self.re_underline.is_match(w[1]))
            .filter_map(|w| self.re_heading.captures(w[0]))
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
    fn is_header(&self, line: &str) -> bool { line.contains("Addressing") || self.re_dash_rule.is_match(line) }
}
impl TableParser for UnofficialParser {
    fn parse(&self, text: &str) -> Result<Vec<RawRow>, Error> {
        let lines: Vec<&str> = text.lines().collect();
        let mut names = self.mnemonics(&lines).into_iter();
        let mut rows = Vec::new();
        let mut current: Option<String> = None;
        let mut in_block = false;
        let mut tables = 0usize;
        for (i, line) in lines.iter().enumerate() {
            let line_num = i + 1;
            if self.is_header(line) {
                in_block = false;
                continue;
            }
            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            if fields.len() != 5 {
                continue;
            }
            if !in_block {
                let name = names.next().ok_or_else(|| {
                    source_err!(
                        ErrorKind::Underrun,
                        format!("{} line {}", CONTEXT, line_num),
                        "table #{} has no mnemonic heading left to claim it",
                        tables + 1
                    )
                })?;
                verbose_println!("{} line {}: table for {}", CONTEXT, line_num, name);
                current = Some(format!("{}{}", UNOFFICIAL_PREFIX, name));
                in_block = true;
                tables += 1;
            }
            if let Some(mnemonic) = current.as_ref() {
                rows.push(RawRow {
                    source: Source::Unofficial,
                    mnemonic: mnemonic.clone(),
                    addressing_label: fields[0].to_string(),
                    opcode_byte: fields[2].to_string(),
                    size_text: fields[3].to_string(),
                    cycle_text: fields[4].to_string(),
                    origin: format!("{} line {}", CONTEXT, line_num),
                });
            }
        }
        let leftover: Vec<String> = names.collect();
        if !leftover.is_empty() {
            warn!(
                "{}: {} headings without a table: {}",
                CONTEXT,
                leftover.len(),
                leftover.join(", ")
            );
        }
        verbose_println!("{}: {} tables", CONTEXT, tables);
        Ok(rows)
    }
}
