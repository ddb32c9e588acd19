//! CoCoPUTs codon usage counts from the FDA DNA-Hive API.
//!
//! The raw response is a quoted `key,value` CSV: codon lines carry occurrence
//! counts, every other line is a metadata field.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use super::transport::{display_url, Transport};
use super::{RemoteSource, Source};
use crate::error::{Result, TableError};
use crate::io::csv;
use crate::table::CodonTable;
use crate::usage::{self, CodonCounts};
use crate::util::dna;

pub const COCOPUTS_URL: &str = "https://dnahive.fda.gov/dna.cgi";

pub fn query(taxid: u64) -> Vec<(&'static str, String)> {
    vec![
        ("cmd", "ionTaxidCollapseExt".to_string()),
        ("svcType", "svc-codon-usage".to_string()),
        ("objId", "537".to_string()),
        ("fileSource", "Refseq_species.tsv".to_string()),
        ("plen", "3".to_string()),
        ("taxid", taxid.to_string()),
        ("filterInColName", r#"["Organelle"]"#.to_string()),
        ("filterIn", r#"["genomic"]"#.to_string()),
        ("searchDeep", "true".to_string()),
        ("raw", "1".to_string()),
    ]
}

/// Parsed CoCoPUTs answer. Codons are stored in the RNA alphabet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodonUsageResult {
    pub taxid: u64,
    pub num_codons: u64,
    pub num_cds: u64,
    pub gc_percentage_overall: f64,
    /// GC% at codon positions 1, 2 and 3.
    pub gc_percentage_by_codon_position: (f64, f64, f64),
    pub codon_usage_table: CodonCounts,
}

fn unquote(field: &str) -> &str {
    field.trim().trim_matches('"')
}

fn required<'a>(metadata: &HashMap<&str, &'a str>, key: &'static str) -> Result<&'a str> {
    metadata.get(key).copied().ok_or(TableError::MissingField(key))
}

fn number<T: FromStr>(field: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| TableError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl CodonUsageResult {
    /// Build from the raw API response text. The first line is a header.
    ///
    /// Missing metadata (`taxid`, `#codon`, `#CDS`, `GC%`, `GC1%`, `GC2%`,
    /// `GC3%`) or an unparsable number means the upstream format changed, and
    /// is reported as an error rather than papered over.
    pub fn from_api_response(text: &str) -> Result<Self> {
        let mut metadata: HashMap<&str, &str> = HashMap::new();
        let mut counts = CodonCounts::new();

        for (i, line) in text.trim().lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line.split_once(',').ok_or_else(|| TableError::MalformedLine {
                line: i + 1,
                content: line.to_string(),
            })?;
            let key = unquote(key);
            let value = unquote(value);

            if dna::is_codon(key) {
                counts.insert(dna::to_rna(&key.to_ascii_uppercase()), number(key, value)?);
            } else {
                metadata.insert(key, value);
            }
        }

        let gc1 = number("GC1%", required(&metadata, "GC1%")?)?;
        let gc2 = number("GC2%", required(&metadata, "GC2%")?)?;
        let gc3 = number("GC3%", required(&metadata, "GC3%")?)?;
        Ok(Self {
            taxid: number("taxid", required(&metadata, "taxid")?)?,
            num_codons: number("#codon", required(&metadata, "#codon")?)?,
            num_cds: number("#CDS", required(&metadata, "#CDS")?)?,
            gc_percentage_overall: number("GC%", required(&metadata, "GC%")?)?,
            gc_percentage_by_codon_position: (gc1, gc2, gc3),
            codon_usage_table: counts,
        })
    }

    /// Amino acid -> codon -> fraction of that amino acid's codons.
    pub fn normalized(&self) -> CodonTable {
        usage::normalize(&self.codon_usage_table)
    }

    /// Canonical CSV of the normalized table.
    pub fn to_csv(&self) -> String {
        csv::serialize(&self.normalized())
    }
}

/// Fetch and parse the full usage record, metadata included.
pub fn fetch_codon_usage(
    transport: &dyn Transport,
    taxid: u64,
    timeout: Duration,
) -> Result<CodonUsageResult> {
    let raw = Cocoputs.fetch_raw(transport, taxid, timeout)?;
    CodonUsageResult::from_api_response(&raw)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cocoputs;

impl RemoteSource for Cocoputs {
    fn source(&self) -> Source {
        Source::Cocoputs
    }

    fn fetch_raw(&self, transport: &dyn Transport, taxid: u64, timeout: Duration) -> Result<String> {
        let params = query(taxid);
        let resp = transport.get(COCOPUTS_URL, &params, timeout)?;
        if !resp.is_success() {
            return Err(TableError::HttpStatus {
                url: display_url(COCOPUTS_URL, &params),
                status: resp.status,
            });
        }
        Ok(resp.body)
    }

    fn parse(&self, _taxid: u64, raw: &str) -> Result<CodonTable> {
        Ok(CodonUsageResult::from_api_response(raw)?.normalized())
    }
}
