//! Merges the normalized rows of both references into one [`InstructionSet`].
//!
//! Every row becomes a record; nothing is collapsed at that level. The dispatch
//! list is different: the emulator needs exactly one handler per instruction,
//! so it holds one entry per canonical (un-prefixed) mnemonic, first occurrence
//! wins and official groups are always visited before unofficial ones.

use super::record::{canonical_mnemonic, OpcodeRecord, RawRow};
use super::*;

/// One handler the emulator must provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEntry {
    /// mnemonic as recorded by the group that introduced it (`LDA`, `*DOP`)
    pub mnemonic: String,
    /// mnemonic with the unofficial prefix removed, what the emulator matches on
    pub canonical: String,
    /// lower-cased canonical name, the handler method the emulator implements
    pub handler: String,
    pub is_official: bool,
}

/// A mnemonic and its records, as consecutive rows in one reference list them.
struct InstructionGroup {
    mnemonic: String,
    is_official: bool,
    records: Vec<OpcodeRecord>,
}

pub struct InstructionSet {
    records: Vec<OpcodeRecord>,
    dispatch: Vec<DispatchEntry>,
    by_opcode: [Option<usize>; 256],
}

/// Normalizes and merges rows. Official rows are expected before unofficial ones,
/// but the dispatch precedence does not depend on it.
pub fn merge(rows: &[RawRow]) -> Result<InstructionSet, Error> {
    let mut groups: Vec<InstructionGroup> = Vec::new();
    let mut by_opcode: [Option<usize>; 256] = [None; 256];
    let mut count = 0usize;
    for row in rows {
        let record = OpcodeRecord::from_raw(row)?;
        let slot = &mut by_opcode[record.opcode_byte as usize];
        if let Some(prev) = *slot {
            let other = groups
                .iter()
                .flat_map(|g| g.records.iter())
                .nth(prev)
                .map_or("?", |r| r.mnemonic.as_str());
            return Err(source_err!(
                ErrorKind::DuplicateEncoding,
                row.origin,
                "opcode ${:02X} claimed by both {} and {}",
                record.opcode_byte,
                other,
                record.mnemonic
            ));
        }
        *slot = Some(count);
        count += 1;
        let continues_group = groups
            .last()
            .is_some_and(|g| g.mnemonic == record.mnemonic && g.is_official == record.is_official);
        match groups.last_mut() {
            Some(g) if continues_group => g.records.push(record),
            _ => groups.push(InstructionGroup {
                mnemonic: record.mnemonic.clone(),
                is_official: record.is_official,
                records: vec![record],
            }),
        }
    }
    let dispatch = dispatch_entries(&groups);
    verbose_println!(
        "merged {} records in {} groups into {} dispatch entries",
        count,
        groups.len(),
        dispatch.len()
    );
    let records = groups.into_iter().flat_map(|g| g.records).collect();
    Ok(InstructionSet {
        records,
        dispatch,
        by_opcode,
    })
}

fn dispatch_entries(groups: &[InstructionGroup]) -> Vec<DispatchEntry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut dispatch = Vec::new();
    let official = groups.iter().filter(|g| g.is_official);
    let unofficial = groups.iter().filter(|g| !g.is_official);
    for g in official.chain(unofficial) {
        let canonical = canonical_mnemonic(&g.mnemonic);
        if !seen.insert(canonical) {
            continue;
        }
        dispatch.push(DispatchEntry {
            mnemonic: g.mnemonic.clone(),
            canonical: canonical.to_string(),
            handler: canonical.to_ascii_lowercase(),
            is_official: g.is_official,
        });
    }
    dispatch
}

impl InstructionSet {
    /// Every record, one per opcode byte, in document order.
    pub fn records(&self) -> &[OpcodeRecord] { &self.records }
    /// One entry per distinct canonical mnemonic.
    pub fn dispatch(&self) -> &[DispatchEntry] { &self.dispatch }
    pub fn by_opcode(&self, op: u8) -> Option<&OpcodeRecord> {
        self.by_opcode[op as usize].and_then(|i| self.records.get(i))
    }
    pub fn dump(&self) {
        println!(
            "{} opcodes, {} handlers:",
            self.records.len(),
            self.dispatch.len()
        );
        println!(
            blue!("{:4} {:5} {:12} {:2} {:2} {:12} {}"),
            "OP", "NAME", "MODE", "SZ", "CY", "EXTRA", "SOURCE"
        );
        for r in &self.records {
            println!("{}", r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;
    use crate::cycles::CycleAdjustment;
    use crate::source::Source;

    fn row(source: Source, mnemonic: &str, op: &str, mode: &str, size: &str, cycles: &str) -> RawRow {
        RawRow {
            source,
            mnemonic: mnemonic.to_string(),
            opcode_byte: op.to_string(),
            addressing_label: mode.to_string(),
            size_text: size.to_string(),
            cycle_text: cycles.to_string(),
            origin: format!("{} {}", source, op),
        }
    }
    fn official(mnemonic: &str, op: &str, mode: &str, size: &str, cycles: &str) -> RawRow {
        row(Source::Official, mnemonic, op, mode, size, cycles)
    }
    fn unofficial(mnemonic: &str, op: &str, mode: &str, size: &str, cycles: &str) -> RawRow {
        row(Source::Unofficial, mnemonic, op, mode, size, cycles)
    }
    fn handlers(set: &InstructionSet) -> Vec<&str> { set.dispatch().iter().map(|d| d.handler.as_str()).collect() }

    #[test]
    fn nop_modes_share_one_handler() -> Result<(), Error> {
        let rows = vec![
            unofficial("*NOP", "$04", "Zero Page", "2", "3"),
            unofficial("*NOP", "$0C", "Absolute", "3", "4"),
            unofficial("*NOP", "$1A", "Implied", "1", "2"),
            unofficial("*NOP", "$80", "Immediate", "2", "2"),
        ];
        let set = merge(&rows)?;
        assert_eq!(set.records().len(), 4);
        let modes: Vec<AddressingMode> = set.records().iter().map(|r| r.addressing_mode).collect();
        assert_eq!(
            modes,
            vec![
                AddressingMode::ZeroPage,
                AddressingMode::Absolute,
                AddressingMode::Implied,
                AddressingMode::Immediate
            ]
        );
        assert_eq!(
            set.dispatch(),
            &[DispatchEntry {
                mnemonic: "*NOP".to_string(),
                canonical: "NOP".to_string(),
                handler: "nop".to_string(),
                is_official: false,
            }]
        );
        Ok(())
    }
    #[test]
    fn official_wins_over_prefixed_unofficial() -> Result<(), Error> {
        let rows = vec![
            official("LDA", "$A9", "Immediate", "2", "2"),
            official("NOP", "$EA", "Implied", "1", "2"),
            official("SBC", "$E9", "Immediate", "2", "2"),
            unofficial("*NOP", "$1A", "Implied", "1", "2"),
            unofficial("*LAX", "$A7", "Zero Page", "2", "3"),
            unofficial("*SBC", "$EB", "Immediate", "2", "2"),
        ];
        let set = merge(&rows)?;
        assert_eq!(set.records().len(), 6);
        assert_eq!(handlers(&set), vec!["lda", "nop", "sbc", "lax"]);
        let nop = &set.dispatch()[1];
        assert!(nop.is_official);
        assert_eq!(nop.mnemonic, "NOP");
        // the unofficial encodings keep their own records
        assert_eq!(set.by_opcode(0xeb).map(|r| r.mnemonic.as_str()), Some("*SBC"));
        Ok(())
    }
    #[test]
    fn official_precedence_independent_of_row_order() -> Result<(), Error> {
        let rows = vec![
            unofficial("*NOP", "$1A", "Implied", "1", "2"),
            official("NOP", "$EA", "Implied", "1", "2"),
        ];
        let set = merge(&rows)?;
        assert_eq!(set.dispatch().len(), 1);
        assert!(set.dispatch()[0].is_official);
        Ok(())
    }
    #[test]
    fn repeated_mnemonic_groups_collapse() -> Result<(), Error> {
        let rows = vec![
            official("LDA", "$A9", "Immediate", "2", "2"),
            official("INX", "$E8", "Implied", "1", "2"),
            official("LDA", "$A5", "Zero Page", "2", "3"),
        ];
        let set = merge(&rows)?;
        assert_eq!(handlers(&set), vec!["lda", "inx"]);
        assert_eq!(set.records().len(), 3);
        Ok(())
    }
    #[test]
    fn duplicate_encoding_is_fatal() {
        let rows = vec![
            official("NOP", "$EA", "Implied", "1", "2"),
            unofficial("*NOP", "$EA", "Implied", "1", "2"),
        ];
        let e = merge(&rows).err().expect("duplicate accepted");
        assert_eq!(e.kind, ErrorKind::DuplicateEncoding);
        assert!(e.msg.contains("$EA"));
        assert_eq!(e.ctx.as_deref(), Some("unofficial $EA"));
    }
    #[test]
    fn normalization_errors_propagate() {
        let rows = vec![official("LDA", "$A9", "Immedate", "2", "2")];
        assert_eq!(merge(&rows).err().map(|e| e.kind), Some(ErrorKind::UnknownAddressingMode));
    }
    #[test]
    fn lookup_and_sizes() -> Result<(), Error> {
        let rows = vec![
            official("JMP", "$4C", "Absolute", "3", "3"),
            official("JMP", "$6C", "Indirect", "2", "5"),
            official("BCC", "$90", "Relative", "2", "2 (+1 if branch succeeds +2 if to a new page)"),
        ];
        let set = merge(&rows)?;
        let jmp = set.by_opcode(0x6c).expect("JMP indirect");
        assert_eq!(jmp.size_bytes, 3);
        assert_eq!(jmp.base_cycles, 5);
        let bcc = set.by_opcode(0x90).expect("BCC");
        assert_eq!(bcc.cycle_adjustment, CycleAdjustment::BranchTaken);
        assert!(set.by_opcode(0x00).is_none());
        for r in set.records() {
            assert_eq!(r.size_bytes, r.addressing_mode.size());
        }
        Ok(())
    }
}
