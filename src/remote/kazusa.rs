//! Kazusa codon usage database (`showcodon.cgi`).
//!
//! The page embeds the table as text runs like `UUU F 0.57`; frequencies are
//! already relative, so extraction yields CSV text for [`csv::parse`].

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::transport::{display_url, Transport};
use super::{RemoteSource, Source};
use crate::error::{Result, TableError};
use crate::io::csv;
use crate::table::CodonTable;

pub const KAZUSA_URL: &str = "http://www.kazusa.or.jp/codon/cgi-bin/showcodon.cgi";

static CODON_RUN: Lazy<Regex> = Lazy::new(|| {
    // codon, amino acid (or stop), frequency
    Regex::new(r"([ATGCU]{3}) ([A-Z]|\*) (\d\.\d+)").expect("valid codon regex")
});

pub fn query(taxid: u64) -> Vec<(&'static str, String)> {
    vec![
        ("aa", "1".to_string()),
        ("style", "N".to_string()),
        ("species", taxid.to_string()),
    ]
}

fn is_not_found_page(html: &str) -> bool {
    html.to_ascii_lowercase().contains("<title>not found</title>")
}

/// Extract the codon table of a Kazusa page as canonical CSV text: header,
/// then `amino_acid,codon,frequency` lines sorted lexicographically.
pub fn page_to_csv(taxid: u64, html: &str) -> Result<String> {
    let page = html.replace(['\r', '\n'], " ");
    if is_not_found_page(&page) {
        return Err(TableError::NotFound {
            taxid,
            url: display_url(KAZUSA_URL, &query(taxid)),
        });
    }
    let mut rows: Vec<String> = CODON_RUN
        .captures_iter(&page)
        .map(|cap| format!("{},{},{}", &cap[2], &cap[1], &cap[3]))
        .collect();
    rows.sort();

    let mut out = String::from(csv::HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(&row);
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Kazusa;

impl RemoteSource for Kazusa {
    fn source(&self) -> Source {
        Source::Kazusa
    }

    fn fetch_raw(&self, transport: &dyn Transport, taxid: u64, timeout: Duration) -> Result<String> {
        let params = query(taxid);
        let resp = transport.get(KAZUSA_URL, &params, timeout)?;
        if resp.status == 404 {
            return Err(TableError::NotFound { taxid, url: display_url(KAZUSA_URL, &params) });
        }
        if !resp.is_success() && !is_not_found_page(&resp.body) {
            return Err(TableError::HttpStatus {
                url: display_url(KAZUSA_URL, &params),
                status: resp.status,
            });
        }
        Ok(resp.body)
    }

    fn parse(&self, taxid: u64, raw: &str) -> Result<CodonTable> {
        csv::parse(&page_to_csv(taxid, raw)?)
    }
}
