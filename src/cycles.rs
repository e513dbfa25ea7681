//! Cycle column classification.
//!
//! The official reference writes cycle counts like `4 (+1 if page crossed)` or
//! `2 (+1 if branch succeeds +2 if to a new page)`. The undocumented reference
//! writes `4 *` for a page-cross penalty and `-` where there is no count (the
//! KIL/JAM opcodes). Both end up here so a wording change only touches this file.

use super::*;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_PAREN: Regex = Regex::new(r"\([^)]*\)").unwrap();
    static ref RE_LEADING_INT: Regex = Regex::new(r"^\s*(\d+)").unwrap();
}

/// Extra cycles an instruction may take on top of its base count.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CycleAdjustment {
    #[default]
    None,
    PageCrossed,
    BranchTaken,
}
impl fmt::Display for CycleAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{:?}", self) }
}

/// Splits raw cycle text into its base count and adjustment.
pub fn classify(text: &str) -> Result<(u8, CycleAdjustment), Error> {
    let trimmed = text.trim();
    if trimmed == "-" {
        return Ok((0, CycleAdjustment::None));
    }
    let adjustment = if trimmed.contains("branch succeeds") {
        CycleAdjustment::BranchTaken
    } else if trimmed.contains("page crossed") || trimmed.ends_with('*') {
        CycleAdjustment::PageCrossed
    } else {
        CycleAdjustment::None
    };
    let bare = RE_PAREN.replace_all(trimmed, "");
    let bare = bare.trim().trim_end_matches('*');
    let digits = RE_LEADING_INT
        .captures(bare)
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidCycleCount,
                None,
                format!("no cycle count in \"{}\"", text).as_str(),
            )
        })?;
    let base = digits.as_str().parse::<u8>().map_err(|_| {
        Error::new(
            ErrorKind::InvalidCycleCount,
            None,
            format!("cycle count {} in \"{}\" is out of range", digits.as_str(), text).as_str(),
        )
    })?;
    Ok((base, adjustment))
}
