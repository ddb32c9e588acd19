use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TableError};

/// One row of `organisms.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organism {
    #[serde(rename = "organism")]
    pub name: String,
    pub taxid: u64,
}

impl Organism {
    /// Bundled table name, `<organism>_<taxid>`.
    pub fn table_name(&self) -> String {
        format!("{}_{}", self.name, self.taxid)
    }
}

/// Parse an `organism,taxid` listing. The header row is required; every
/// record must have exactly two fields.
pub fn parse_organisms<R: Read>(rdr: R) -> Result<Vec<Organism>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(::csv::Trim::All)
        .from_reader(rdr);
    reader
        .deserialize::<Organism>()
        .map(|row| row.map_err(malformed))
        .collect()
}

pub fn read_organisms(path: &Path) -> Result<Vec<Organism>> {
    let fh = std::fs::File::open(path).map_err(|e| TableError::io(path, e))?;
    parse_organisms(fh)
}

fn malformed(e: ::csv::Error) -> TableError {
    let line = e.position().map_or(0, |pos| pos.line() as usize);
    TableError::MalformedCsv { line, reason: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_listing() {
        let data = "organism,taxid\ne_coli,316407\r\n\nh_sapiens, 9606\n";
        let orgs = parse_organisms(data.as_bytes()).unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0], Organism { name: "e_coli".into(), taxid: 316407 });
        assert_eq!(orgs[0].table_name(), "e_coli_316407");
        assert_eq!(orgs[1].name, "h_sapiens");
        assert_eq!(orgs[1].taxid, 9606);
    }

    #[test]
    fn bad_taxid_is_error() {
        let data = "organism,taxid\ne_coli,abc\n";
        let err = parse_organisms(data.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::MalformedCsv { line: 2, .. }), "{:?}", err);
    }

    #[test]
    fn wrong_field_count_is_error() {
        let data = "organism,taxid\ne_coli\n";
        let err = parse_organisms(data.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::MalformedCsv { line: 2, .. }), "{:?}", err);

        let data = "organism,taxid\ne_coli,316407,extra\n";
        assert!(parse_organisms(data.as_bytes()).is_err());
    }

    #[test]
    fn shipped_listing_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("codon_usage_data/organisms.csv");
        let orgs = read_organisms(&path).unwrap();
        assert!(orgs.iter().any(|o| o.table_name() == "e_coli_316407"));
        assert!(orgs.iter().any(|o| o.table_name() == "h_sapiens_9606"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_organisms(&dir.path().join("nope.csv")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
