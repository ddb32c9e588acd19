//! Regenerating bundled tables from the remote services.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::error::{Result, TableError};
use crate::io::csv;
use crate::io::organisms::Organism;
use crate::remote::{Source, Transport};

/// Fetch one table and write it as canonical CSV (codons as the service
/// returns them, no U -> T substitution). Overwrites `target`.
pub fn download_table(
    transport: &dyn Transport,
    source: Source,
    taxid: u64,
    timeout: Duration,
    target: &Path,
) -> Result<()> {
    let table = source.remote().fetch_table(transport, taxid, timeout)?;
    csv::write_table(target, &table)?;
    info!(%source, taxid, target = %target.display(), "codon table written");
    Ok(())
}

/// Rewrite `<tables_dir>/<source>/<organism>_<taxid>.csv` for every organism
/// and both sources. Stops at the first failure; files already written stay.
pub fn refresh_bundled(
    transport: &dyn Transport,
    organisms: &[Organism],
    tables_dir: &Path,
    timeout: Duration,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(organisms.len() * Source::ALL.len());
    for organism in organisms {
        info!(organism = %organism.name, taxid = organism.taxid, "retrieving codon tables");
        for source in Source::ALL {
            let dir = tables_dir.join(source.as_str());
            std::fs::create_dir_all(&dir).map_err(|e| TableError::io(&dir, e))?;
            let target = dir.join(format!("{}.csv", organism.table_name()));
            download_table(transport, source, organism.taxid, timeout, &target)?;
            written.push(target);
        }
    }
    Ok(written)
}
