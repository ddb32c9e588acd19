use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Result, TableError};
use crate::table::CodonTable;

pub const HEADER: &str = "amino_acid,codon,relative_frequency";

/// Parse `amino_acid,codon,relative_frequency` CSV text.
///
/// The first line is the header and is skipped without inspection. Blank lines
/// are ignored; any other line must have exactly three fields, a one-character
/// amino acid and a numeric frequency, otherwise the whole parse fails.
pub fn parse(text: &str) -> Result<CodonTable> {
    let mut table = CodonTable::new();
    for (i, raw) in text.lines().enumerate().skip(1) {
        let line_no = i + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            return Err(TableError::MalformedCsv {
                line: line_no,
                reason: format!("expected 3 fields, found {}: '{}'", fields.len(), line),
            });
        }
        let mut aa_chars = fields[0].chars();
        let aa = match (aa_chars.next(), aa_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(TableError::MalformedCsv {
                    line: line_no,
                    reason: format!("amino acid must be a single character, got '{}'", fields[0]),
                })
            }
        };
        let freq: f64 = fields[2].trim().parse().map_err(|_| TableError::MalformedCsv {
            line: line_no,
            reason: format!("relative frequency is not a number: '{}'", fields[2]),
        })?;
        table.entry(aa).or_default().insert(fields[1].to_string(), freq);
    }
    Ok(table)
}

/// Serialize with rows sorted by amino acid, then codon.
pub fn serialize(table: &CodonTable) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + 64 * 24);
    out.push_str(HEADER);
    out.push('\n');
    for (aa, codons) in table {
        for (codon, &freq) in codons {
            // writing into a String cannot fail
            let _ = writeln!(out, "{},{},{}", aa, codon, format_frequency(freq));
        }
    }
    out
}

/// Shortest round-trip decimal, always with a fractional part (`1.0`, not `1`).
pub fn format_frequency(freq: f64) -> String {
    format!("{:?}", freq)
}

pub fn read_table(path: &Path) -> Result<CodonTable> {
    let text = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    parse(&text)
}

/// Whole-file overwrite.
pub fn write_table(path: &Path, table: &CodonTable) -> Result<()> {
    std::fs::write(path, serialize(table)).map_err(|e| TableError::io(path, e))
}
