//! # A 6502 opcode table scraper.
//!
//! Reads the official instruction reference (HTML) and the undocumented opcode
//! listing (plain text), normalizes every opcode row from both, and writes an
//! opcode table plus a handler dispatch `match` for an emulator's CPU core.
//!
//! ## Getting Started
//! Download the two references once:
//! ```text
//! curl -o reference.html https://www.nesdev.org/obelisk-6502-guide/reference.html
//! curl -o undocumented_opcodes.txt https://www.nesdev.org/undocumented_opcodes.txt
//! ```
//! then generate the table:
//! ```text
//! cargo run -- reference.html undocumented_opcodes.txt -o src/opscodes.rs
//! ```
//! ## Options
//! Help for command line options is available using -h or --help.
#[macro_use]
mod macros;
mod addressing;
mod config;
mod cycles;
mod emit;
mod error;
mod merge;
mod official;
mod record;
mod source;
mod unofficial;
use crate::emit::Templates;
use crate::merge::InstructionSet;
use crate::source::{DocumentFetcher, FileFetcher, Source};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::result::Result;
pub(crate) use crate::error::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::init();
    let fetcher = FileFetcher::new(config::ARGS.official.as_str(), config::ARGS.unofficial.as_str());
    // scrape does all the work
    if let Err(e) = scrape(&fetcher, &mut io::stdout().lock()) {
        eprintln!("{}", e);
        return Err(Box::new(e));
    }
    Ok(())
}
/// Runs both references through the pipeline and returns the merged set.
fn build(fetcher: &dyn DocumentFetcher) -> Result<InstructionSet, Error> {
    let mut rows = source::load_rows(fetcher, Source::Official)?;
    rows.extend(source::load_rows(fetcher, Source::Unofficial)?);
    let set = merge::merge(&rows)?;
    info!(
        "{} opcodes, {} handlers",
        set.records().len(),
        set.dispatch().len()
    );
    Ok(set)
}
/// scrape drives the top level functionality (build, inspect, emit) of the app.
/// Without `--out` the generated source goes to `out`.
fn scrape(fetcher: &dyn DocumentFetcher, out: &mut dyn io::Write) -> Result<(), Error> {
    let set = build(fetcher)?;
    if config::ARGS.list {
        set.dump();
    }
    if let Some(op) = config::ARGS.show {
        let r = set
            .by_opcode(op)
            .ok_or_else(|| general_err!(format!("opcode ${:02X} is not in either reference", op)))?;
        println!("{}", r);
    }
    let templates = match config::ARGS.templates.as_ref() {
        Some(path) => Templates::read_from_file(Path::new(path))?,
        None => Templates::default(),
    };
    if let Some(path) = config::ARGS.out.as_ref() {
        let mut file = File::create(path)?;
        emit::render(&set, &templates, &mut file)?;
        info!("wrote opcode table: {}", path);
    } else if !config::ARGS.list && config::ARGS.show.is_none() {
        emit::render(&set, &templates, out)?;
    }
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;
    use crate::cycles::CycleAdjustment;
    use crate::record::OpcodeRecord;

    fn fixtures() -> FileFetcher { FileFetcher::new("test/official.html", "test/unofficial.txt") }

    #[test]
    fn fixture_references() -> Result<(), Error> {
        let set = build(&fixtures())?;
        assert_eq!(set.records().len(), 44);
        let handlers: Vec<&str> = set.dispatch().iter().map(|d| d.handler.as_str()).collect();
        assert_eq!(
            handlers,
            vec!["adc", "asl", "bcc", "inx", "jmp", "ldx", "nop", "sbc", "aac", "dop", "kil", "lax", "top"]
        );
        // the official rows come first and keep document order
        assert_eq!(set.records()[0].opcode_byte, 0x69);
        assert_eq!(set.records()[25].mnemonic, "*AAC");
        Ok(())
    }
    #[test]
    fn fixture_invariants() -> Result<(), Error> {
        let set = build(&fixtures())?;
        let mut seen = HashSet::new();
        for r in set.records() {
            assert!(seen.insert(r.opcode_byte), "opcode ${:02X} repeated", r.opcode_byte);
            assert_eq!(r.size_bytes, r.addressing_mode.size(), "{}", r);
            assert!((1..=3).contains(&r.size_bytes));
            assert_eq!(set.by_opcode(r.opcode_byte), Some(r));
        }
        let mut names = HashSet::new();
        for d in set.dispatch() {
            assert!(names.insert(d.canonical.as_str()), "{} dispatched twice", d.canonical);
        }
        // NOP and SBC exist in both references; the official entry is the one kept
        for name in ["NOP", "SBC"] {
            let d = set.dispatch().iter().find(|d| d.canonical == name).expect(name);
            assert!(d.is_official);
            assert_eq!(d.mnemonic, name);
        }
        Ok(())
    }
    #[test]
    fn fixture_records() -> Result<(), Error> {
        let set = build(&fixtures())?;
        assert_eq!(
            set.by_opcode(0xe8),
            Some(&OpcodeRecord {
                mnemonic: "INX".to_string(),
                is_official: true,
                opcode_byte: 0xe8,
                addressing_mode: AddressingMode::Implied,
                size_bytes: 1,
                base_cycles: 2,
                cycle_adjustment: CycleAdjustment::None,
            })
        );
        let adc = set.by_opcode(0x71).expect("ADC (Indirect),Y");
        assert_eq!((adc.base_cycles, adc.cycle_adjustment), (5, CycleAdjustment::PageCrossed));
        let bcc = set.by_opcode(0x90).expect("BCC");
        assert_eq!((bcc.base_cycles, bcc.cycle_adjustment), (2, CycleAdjustment::BranchTaken));
        let kil = set.by_opcode(0x12).expect("KIL");
        assert_eq!((kil.mnemonic.as_str(), kil.base_cycles), ("*KIL", 0));
        let lax = set.by_opcode(0xbf).expect("LAX Absolute,Y");
        assert_eq!(lax.cycle_adjustment, CycleAdjustment::PageCrossed);
        // the listing says 2 bytes here; the addressing mode says 3
        let top = set.by_opcode(0x3c).expect("TOP Absolute,X");
        assert_eq!(top.size_bytes, 3);
        let asl = set.by_opcode(0x0a).expect("ASL A");
        assert_eq!(asl.addressing_mode, AddressingMode::Accumulator);
        Ok(())
    }
    #[test]
    fn bad_fixture_addressing_mode() {
        struct Typo;
        impl DocumentFetcher for Typo {
            fn fetch(&self, source: Source) -> Result<String, Error> {
                let text = fixtures().fetch(source)?;
                Ok(match source {
                    Source::Official => text,
                    Source::Unofficial => text.replacen("Zero Page,Y", "Zero Page,Z", 1),
                })
            }
        }
        let e = build(&Typo).err().expect("typo accepted");
        assert_eq!(e.kind, ErrorKind::UnknownAddressingMode);
    }
    #[test]
    fn scrape_with_default_args() -> Result<(), Error> {
        // config::ARGS under test points at the fixtures with verbose on
        assert!(config::ARGS.verbose);
        let mut out = Vec::new();
        scrape(&fixtures(), &mut out)?;
        let text = String::from_utf8_lossy(&out);
        // log lines stay out of the generated source
        assert!(text.starts_with(&format!("{}\n", Templates::default().header)));
        assert_eq!(text.matches("OpCode::new(").count(), 44);
        assert!(!text.contains("reference"));
        Ok(())
    }
}
