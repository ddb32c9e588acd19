//! 码表解析：把灵活的表标识（taxid / 短名 / 完整内置表名）解析为密码子频率表。
//!
//! Resolution order for a source:
//! 1. identifiers made only of digits are taxids, fetched from the remote service;
//! 2. otherwise a bundled table name, full (`e_coli_316407`) or short (`e_coli`);
//! 3. otherwise an organism of the `organisms.csv` listing whose bundled file
//!    has not been fetched yet: fetched by taxid and written into the bundled
//!    directory, so later processes load it from disk;
//! 4. anything else is an unknown identifier.
//!
//! U -> T substitution is applied last, on top of the unsubstituted result.
//! Results are memoized per exact argument tuple.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Result, TableError};
use crate::io::bundled::BundledTables;
use crate::io::csv;
use crate::io::organisms::Organism;
use crate::remote::{Source, Transport};
use crate::table::{self, CodonTable};

/// A parsed table identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableId {
    Taxid(u64),
    Name(String),
}

impl TableId {
    pub fn parse(identifier: &str) -> Result<Self> {
        if !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit()) {
            identifier
                .parse()
                .map(TableId::Taxid)
                .map_err(|_| TableError::InvalidTaxid(identifier.to_string()))
        } else {
            Ok(TableId::Name(identifier.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    identifier: String,
    replace_u_by_t: bool,
    timeout: Duration,
    source: Source,
}

pub struct Resolver {
    bundled: BundledTables,
    transport: Box<dyn Transport>,
    organisms: Vec<Organism>,
    cache: Mutex<HashMap<CacheKey, CodonTable>>,
}

impl Resolver {
    pub fn new(bundled: BundledTables, transport: Box<dyn Transport>) -> Self {
        Self { bundled, transport, organisms: Vec::new(), cache: Mutex::new(HashMap::new()) }
    }

    /// Organisms whose bundled tables may be fetched on first use.
    pub fn with_organisms(mut self, organisms: Vec<Organism>) -> Self {
        self.organisms = organisms;
        self
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Resolve `identifier` into a codon frequency table.
    ///
    /// With `replace_u_by_t` the codons use the DNA alphabet (`TAA`), otherwise
    /// whatever the origin stores (the RNA alphabet for both services).
    pub fn resolve(
        &self,
        identifier: &str,
        replace_u_by_t: bool,
        timeout: Duration,
        source: Source,
    ) -> Result<CodonTable> {
        let key = CacheKey {
            identifier: identifier.to_string(),
            replace_u_by_t,
            timeout,
            source,
        };
        if let Some(hit) = self.cache_get(&key) {
            debug!(identifier, %source, replace_u_by_t, "codon table cache hit");
            return Ok(hit);
        }

        let table = if replace_u_by_t {
            let raw = self.resolve(identifier, false, timeout, source)?;
            table::with_u_replaced_by_t(&raw)
        } else {
            self.resolve_uncached(identifier, timeout, source)?
        };

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, table.clone());
        Ok(table)
    }

    pub fn resolve_taxid(
        &self,
        taxid: u64,
        replace_u_by_t: bool,
        timeout: Duration,
        source: Source,
    ) -> Result<CodonTable> {
        self.resolve(&taxid.to_string(), replace_u_by_t, timeout, source)
    }

    /// Full names of the bundled tables of `source`, sorted.
    pub fn available_tables(&self, source: Source) -> Vec<String> {
        self.bundled.names(source).map(str::to_string).collect()
    }

    /// Every bundled table of `source`, keyed by full name.
    pub fn resolve_all(
        &self,
        replace_u_by_t: bool,
        timeout: Duration,
        source: Source,
    ) -> Result<BTreeMap<String, CodonTable>> {
        self.available_tables(source)
            .into_iter()
            .map(|name| {
                let table = self.resolve(&name, replace_u_by_t, timeout, source)?;
                Ok((name, table))
            })
            .collect()
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn cache_get(&self, key: &CacheKey) -> Option<CodonTable> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn resolve_uncached(&self, identifier: &str, timeout: Duration, source: Source) -> Result<CodonTable> {
        match TableId::parse(identifier)? {
            TableId::Taxid(taxid) => {
                debug!(taxid, %source, "fetching codon table from remote service");
                source.remote().fetch_table(self.transport(), taxid, timeout)
            }
            TableId::Name(name) => {
                if let Some(full) = self.bundled.expand(source, &name) {
                    let path = self.bundled.table_path(source, full);
                    debug!(table = full, path = %path.display(), "loading bundled codon table");
                    return csv::read_table(&path);
                }
                let organism = self
                    .listed_organism(&name)
                    .ok_or_else(|| TableError::UnknownTable(name.clone()))?;
                self.fetch_listed(organism, timeout, source)
            }
        }
    }

    fn listed_organism(&self, name: &str) -> Option<&Organism> {
        self.organisms
            .iter()
            .find(|o| o.name == name || o.table_name() == name)
    }

    fn fetch_listed(&self, organism: &Organism, timeout: Duration, source: Source) -> Result<CodonTable> {
        let table_name = organism.table_name();
        info!(table = %table_name, %source, "bundled table missing, fetching from remote service");
        let table = source.remote().fetch_table(self.transport(), organism.taxid, timeout)?;

        let path = self.bundled.table_path(source, &table_name);
        let written = path
            .parent()
            .map_or(Ok(()), |dir| std::fs::create_dir_all(dir).map_err(|e| TableError::io(dir, e)))
            .and_then(|()| csv::write_table(&path, &table));
        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "cannot store fetched table in the bundled directory");
        }
        Ok(table)
    }
}
