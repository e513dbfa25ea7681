//! Renders an [`InstructionSet`] as source text from caller-supplied templates.
//!
//! Output is `header`, one `record` line per opcode, `middle`, one `dispatch`
//! arm per handler, then `footer`. Placeholders are replaced verbatim; any other
//! braces in a template are left alone.
//!
//! | section | placeholders |
//! | --- | --- |
//! | record | `{code}` `{name}` `{bytes}` `{cycles}` `{mode}` `{adjust}` `{official}` |
//! | dispatch | `{name}` `{canonical}` `{handler}` |
//!
//! A template file is split into sections by `%% <section>` lines; sections
//! it leaves out keep their defaults.

use super::merge::InstructionSet;
use super::*;

use std::fs;
use std::io;
use std::path::Path;

const DEFAULT_HEADER: &str = "\
use crate::cpu::AddressingMode;
use crate::cpu::OpCode;
use crate::cpu::CPU;

lazy_static! {
pub static ref CPU_OPS_CODES: Vec<OpCode> = vec![";
const DEFAULT_RECORD: &str = "    OpCode::new({code}, \"{name}\", {bytes}, {cycles}, AddressingMode::{mode}),";
const DEFAULT_MIDDLE: &str = "\
];
}

pub fn call(cpu: &mut CPU, op: &OpCode) {
    match op.name.replace(\"*\", \"\").as_str() {";
const DEFAULT_DISPATCH: &str = "        \"{canonical}\" => {
            cpu.{handler}(&op.addressing_mode);
            cpu.program_counter += op.bytes - 1;
        }";
const DEFAULT_FOOTER: &str = "        _ => unimplemented!(\"{}\", op.name),
    }
}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub header: String,
    pub record: String,
    pub middle: String,
    pub dispatch: String,
    pub footer: String,
}
impl Default for Templates {
    fn default() -> Self {
        Templates {
            header: DEFAULT_HEADER.to_string(),
            record: DEFAULT_RECORD.to_string(),
            middle: DEFAULT_MIDDLE.to_string(),
            dispatch: DEFAULT_DISPATCH.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}
impl Templates {
    /// Parses a sectioned template file over the defaults.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut t = Templates::default();
        let mut sections: Vec<(String, Vec<&str>)> = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if let Some(name) = line.strip_prefix("%%") {
                sections.push((name.trim().to_ascii_lowercase(), Vec::new()));
            } else if let Some((_, body)) = sections.last_mut() {
                body.push(line);
            } else if !line.trim().is_empty() {
                return Err(general_err!(format!(
                    "template line {}: text before the first '%% <section>' line",
                    i + 1
                )));
            }
        }
        for (name, body) in sections {
            let body = body.join("\n");
            match name.as_str() {
                "header" => t.header = body,
                "record" => t.record = body,
                "middle" => t.middle = body,
                "dispatch" => t.dispatch = body,
                "footer" => t.footer = body,
                _ => return Err(general_err!(format!("unknown template section \"{}\"", name))),
            }
        }
        Ok(t)
    }
    pub fn read_from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        verbose_println!("loaded templates from {}", path.display());
        Templates::parse(&text)
    }
}

fn fill(template: &str, values: &[(&str, String)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |s, (key, val)| s.replace(&format!("{{{}}}", key), val))
}

/// Writes the whole generated table to `f`.
pub fn render(set: &InstructionSet, t: &Templates, f: &mut dyn io::Write) -> Result<(), Error> {
    writeln!(f, "{}", t.header)?;
    for r in set.records() {
        let line = fill(
            &t.record,
            &[
                ("code", format!("0x{:02X}", r.opcode_byte)),
                ("name", r.mnemonic.clone()),
                ("bytes", r.size_bytes.to_string()),
                ("cycles", r.base_cycles.to_string()),
                ("mode", r.addressing_mode.to_string()),
                ("adjust", r.cycle_adjustment.to_string()),
                ("official", r.is_official.to_string()),
            ],
        );
        writeln!(f, "{}", line)?;
    }
    writeln!(f, "{}", t.middle)?;
    for d in set.dispatch() {
        let arm = fill(
            &t.dispatch,
            &[
                ("name", d.mnemonic.clone()),
                ("canonical", d.canonical.clone()),
                ("handler", d.handler.clone()),
            ],
        );
        writeln!(f, "{}", arm)?;
    }
    writeln!(f, "{}", t.footer)?;
    Ok(())
}
