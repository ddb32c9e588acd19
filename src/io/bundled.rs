use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, TableError};
use crate::remote::Source;

/// Index of the bundled tables: `<root>/<source>/<organism>_<taxid>.csv`.
///
/// Built once by scanning the directories; never rescanned.
#[derive(Debug, Clone, Default)]
pub struct BundledTables {
    root: PathBuf,
    names: HashMap<Source, BTreeSet<String>>,
    short_names: HashMap<Source, BTreeMap<String, String>>,
}

/// `e_coli_316407` -> `e_coli`. Names without `_` have no short form.
pub fn short_name(table_name: &str) -> Option<&str> {
    table_name.rsplit_once('_').map(|(short, _)| short)
}

impl BundledTables {
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let mut index = Self { root, ..Self::default() };
        for source in Source::ALL {
            let dir = index.source_dir(source);
            if !dir.is_dir() {
                warn!(dir = %dir.display(), "bundled table directory missing, {} has no bundled tables", source);
                continue;
            }
            let names = list_tables(&dir)?;
            let shorts = names
                .iter()
                .filter_map(|name| short_name(name).map(|s| (s.to_string(), name.clone())))
                .collect();
            debug!(%source, tables = names.len(), "indexed bundled tables");
            index.names.insert(source, names);
            index.short_names.insert(source, shorts);
        }
        Ok(index)
    }

    pub fn source_dir(&self, source: Source) -> PathBuf {
        self.root.join(source.as_str())
    }

    pub fn table_path(&self, source: Source, table_name: &str) -> PathBuf {
        self.source_dir(source).join(format!("{}.csv", table_name))
    }

    /// Full table names of one source, sorted.
    pub fn names(&self, source: Source) -> impl Iterator<Item = &str> {
        self.names.get(&source).into_iter().flatten().map(String::as_str)
    }

    /// Map a full name or a short name to the full bundled table name.
    pub fn expand(&self, source: Source, identifier: &str) -> Option<&str> {
        if let Some(name) = self.names.get(&source).and_then(|n| n.get(identifier)) {
            return Some(name.as_str());
        }
        self.short_names
            .get(&source)
            .and_then(|s| s.get(identifier))
            .map(String::as_str)
    }
}

fn list_tables(dir: &Path) -> Result<BTreeSet<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| TableError::io(dir, e))?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| TableError::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else { continue };
        if let Some(stem) = file_name.strip_suffix(".csv") {
            names.insert(stem.to_string());
        }
    }
    Ok(names)
}
