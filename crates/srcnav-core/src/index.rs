//! In-memory symbol database loaded from a JSON index file.
//!
//! ```json
//! { "symbols": [ { "name": "x", "category": "GlobalVariable",
//!                  "definition": { "path": "a.c", "line": 1, "column": 6 } } ],
//!   "refs":    [ { "path": "a.c", "line": 2, "column": 9, "end_column": 10, "symbol": "x" } ] }
//! ```
//!
//! Relative paths are resolved against the index file's directory.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file::SourceFile;
use crate::symbols::{Ref, SymbolCategory, SymbolId, SymbolLocation, SymbolSource};

/// On-disk shape of an index file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexData {
    pub symbols: Vec<SymbolRecord>,
    pub refs: Vec<RefRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    #[serde(default)]
    pub category: Option<SymbolCategory>,
    #[serde(default)]
    pub definition: Option<SymbolLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefRecord {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub end_column: usize,
    pub symbol: String,
}

#[derive(Debug, Default)]
struct SymbolEntry {
    name: String,
    category: Option<SymbolCategory>,
    definitions: Vec<SymbolLocation>,
}

/// A [`SymbolSource`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    symbols: Vec<SymbolEntry>,
    ids: HashMap<String, SymbolId>,
    categories: HashSet<SymbolCategory>,
    refs_by_file: HashMap<PathBuf, Vec<Ref>>,
}

impl MemoryIndex {
    /// Loads an index file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid index.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read index: {}", path.display()))?;
        let data: IndexData = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse index: {}", path.display()))?;
        let index = Self::from_data(data, path.parent());
        tracing::info!(
            "loaded index {} ({} symbols, {} refs)",
            path.display(),
            index.symbol_count(),
            index.ref_count()
        );
        Ok(index)
    }

    /// Parses index JSON; paths stay as written.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid index.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: IndexData = serde_json::from_str(json).context("failed to parse index")?;
        Ok(Self::from_data(data, None))
    }

    /// Builds the index, resolving relative paths against `base_dir`.
    pub fn from_data(data: IndexData, base_dir: Option<&Path>) -> Self {
        let resolve = |path: PathBuf| match base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        };

        let mut index = Self::default();
        for record in data.symbols {
            let id = index.intern(&record.name);
            let entry = &mut index.symbols[id.0 as usize];
            if let Some(category) = record.category {
                entry.category = Some(category);
                index.categories.insert(category);
            }
            if let Some(mut definition) = record.definition {
                definition.path = resolve(definition.path);
                entry.definitions.push(definition);
            }
        }
        for record in data.refs {
            let symbol = index.intern(&record.symbol);
            index
                .refs_by_file
                .entry(resolve(record.path))
                .or_default()
                .push(Ref {
                    line: record.line,
                    column: record.column,
                    end_column: record.end_column,
                    symbol,
                });
        }
        for refs in index.refs_by_file.values_mut() {
            refs.sort_by_key(|r| (r.line, r.column));
        }
        index
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn ref_count(&self) -> usize {
        self.refs_by_file.values().map(Vec::len).sum()
    }

    fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolEntry {
            name: name.to_string(),
            ..Default::default()
        });
        self.ids.insert(name.to_string(), id);
        id
    }

    /// References recorded for `file`, matched by exact path first and then
    /// by path suffix so relative and absolute spellings meet. Among suffix
    /// matches the one sharing the most trailing components wins, ties going
    /// to the lexically smallest indexed path.
    fn refs_for(&self, file: &SourceFile) -> &[Ref] {
        let Some(path) = file.path() else {
            return &[];
        };
        if let Some(refs) = self.refs_by_file.get(path) {
            return refs;
        }
        self.refs_by_file
            .iter()
            .filter_map(|(indexed, refs)| {
                let shared = if path.ends_with(indexed) {
                    indexed.components().count()
                } else if indexed.ends_with(path) {
                    path.components().count()
                } else {
                    return None;
                };
                Some((shared, indexed, refs))
            })
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(a.1)))
            .map(|(_, _, refs)| refs.as_slice())
            .unwrap_or(&[])
    }
}

impl SymbolSource for MemoryIndex {
    fn query_file_refs(&self, file: &SourceFile, visit: &mut dyn FnMut(&Ref)) {
        for r in self.refs_for(file) {
            visit(r);
        }
    }

    fn symbol_category(&self, symbol: SymbolId) -> Option<SymbolCategory> {
        self.symbols.get(symbol.0 as usize)?.category
    }

    fn has_category(&self, category: SymbolCategory) -> bool {
        self.categories.contains(&category)
    }

    fn symbols_at_location(&self, file: &SourceFile, line: usize, column: usize) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for r in self.refs_for(file) {
            if r.line != line || column < r.column || column >= r.end_column {
                continue;
            }
            let name = &self.symbols[r.symbol.0 as usize].name;
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    fn find_single_definition(&self, symbol: &str) -> Option<SymbolLocation> {
        let entry = &self.symbols[self.ids.get(symbol)?.0 as usize];
        match entry.definitions.as_slice() {
            [definition] => Some(definition.clone()),
            _ => None,
        }
    }

    fn references_to(&self, symbol: &str) -> Vec<SymbolLocation> {
        let Some(id) = self.ids.get(symbol) else {
            return Vec::new();
        };
        let mut locations: Vec<SymbolLocation> = self
            .refs_by_file
            .iter()
            .flat_map(|(path, refs)| {
                refs.iter().filter(|r| r.symbol == *id).map(|r| SymbolLocation {
                    path: path.clone(),
                    line: r.line,
                    column: r.column,
                })
            })
            .collect();
        locations.sort_by(|a, b| (&a.path, a.line, a.column).cmp(&(&b.path, b.line, b.column)));
        locations
    }
}
