//! Remote codon usage services.
//!
//! Each service is one [`RemoteSource`] implementation: fetch the raw response
//! for a taxid, then parse it into a [`CodonTable`]. [`Source`] selects which.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TableError};
use crate::table::CodonTable;

pub mod cocoputs;
pub mod kazusa;
pub mod transport;

pub use transport::{HttpResponse, HttpTransport, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Source {
    /// kazusa.or.jp codon usage database (HTML pages, pre-normalized).
    #[default]
    Kazusa,
    /// CoCoPUTs on the FDA DNA-Hive API (raw codon counts).
    Cocoputs,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Kazusa, Source::Cocoputs];

    pub fn as_str(self) -> &'static str {
        match self {
            Source::Kazusa => "kazusa",
            Source::Cocoputs => "cocoputs",
        }
    }

    pub fn remote(self) -> &'static dyn RemoteSource {
        match self {
            Source::Kazusa => &kazusa::Kazusa,
            Source::Cocoputs => &cocoputs::Cocoputs,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Source::ALL
            .into_iter()
            .find(|src| src.as_str() == lower)
            .ok_or_else(|| TableError::UnknownSource(s.to_string()))
    }
}

/// One remote codon usage service.
pub trait RemoteSource: Sync {
    fn source(&self) -> Source;

    /// One blocking request; returns the response body.
    fn fetch_raw(&self, transport: &dyn Transport, taxid: u64, timeout: Duration) -> Result<String>;

    /// Turn a raw response into a normalized table (codons in the RNA alphabet).
    fn parse(&self, taxid: u64, raw: &str) -> Result<CodonTable>;

    fn fetch_table(
        &self,
        transport: &dyn Transport,
        taxid: u64,
        timeout: Duration,
    ) -> Result<CodonTable> {
        let raw = self.fetch_raw(transport, taxid, timeout)?;
        self.parse(taxid, &raw)
    }
}
