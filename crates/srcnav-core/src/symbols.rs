//! The symbol-database seam: references in a file, symbol categories,
//! symbol lookup at a location, and definitions.
//!
//! Everything crossing this boundary uses 1-based lines and columns, with
//! end columns exclusive. [`Ref::span`] converts to the 0-based model.

use std::fmt;
use std::ops::Range;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::file::SourceFile;

/// Opaque identifier of a symbol inside one symbol source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

/// Kind of a symbol, used to pick a highlight color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolCategory {
    Namespace,
    Struct,
    Class,
    Union,
    Enum,
    Typedef,
    Field,
    GlobalVariable,
    Function,
    Method,
    LocalVariable,
    Parameter,
    EnumConstant,
    Macro,
}

impl SymbolCategory {
    pub const ALL: [SymbolCategory; 14] = [
        Self::Namespace,
        Self::Struct,
        Self::Class,
        Self::Union,
        Self::Enum,
        Self::Typedef,
        Self::Field,
        Self::GlobalVariable,
        Self::Function,
        Self::Method,
        Self::LocalVariable,
        Self::Parameter,
        Self::EnumConstant,
        Self::Macro,
    ];

    /// The name the symbol index uses for this category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Namespace => "Namespace",
            Self::Struct => "Struct",
            Self::Class => "Class",
            Self::Union => "Union",
            Self::Enum => "Enum",
            Self::Typedef => "Typedef",
            Self::Field => "Field",
            Self::GlobalVariable => "GlobalVariable",
            Self::Function => "Function",
            Self::Method => "Method",
            Self::LocalVariable => "LocalVariable",
            Self::Parameter => "Parameter",
            Self::EnumConstant => "EnumConstant",
            Self::Macro => "Macro",
        }
    }
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbolCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown symbol category: {s}"))
    }
}

/// A reference reported by the symbol source: columns `[column, end_column)`
/// of `line` resolve to `symbol`. All values are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ref {
    pub line: usize,
    pub column: usize,
    pub end_column: usize,
    pub symbol: SymbolId,
}

/// A reference converted to 0-based line and column range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSpan {
    pub line: usize,
    pub columns: Range<usize>,
    pub symbol: SymbolId,
}

impl Ref {
    pub fn span(&self) -> ReferenceSpan {
        let start = self.column.saturating_sub(1);
        let end = self.end_column.saturating_sub(1).max(start);
        ReferenceSpan {
            line: self.line.saturating_sub(1),
            columns: start..end,
            symbol: self.symbol,
        }
    }
}

/// A place in some file, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolLocation {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SymbolLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

/// Read-only view of a symbol database.
pub trait SymbolSource {
    /// Visits every reference in `file`, in file-line order.
    fn query_file_refs(&self, file: &SourceFile, visit: &mut dyn FnMut(&Ref));

    /// The category of `symbol`, if the database records one.
    fn symbol_category(&self, symbol: SymbolId) -> Option<SymbolCategory>;

    /// Whether this database knows `category` at all. Color mappings for
    /// unknown categories are left out rather than defaulted.
    fn has_category(&self, category: SymbolCategory) -> bool;

    /// Names of the symbols referenced at a 1-based `line`/`column`.
    fn symbols_at_location(&self, file: &SourceFile, line: usize, column: usize) -> Vec<String>;

    /// The definition of `symbol`, if there is exactly one.
    fn find_single_definition(&self, symbol: &str) -> Option<SymbolLocation>;

    /// Every reference to `symbol`, for cross-reference reports.
    fn references_to(&self, _symbol: &str) -> Vec<SymbolLocation> {
        Vec::new()
    }
}

/// A symbol source with no data, used when no index is loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSymbolSource;

impl SymbolSource for NullSymbolSource {
    fn query_file_refs(&self, _file: &SourceFile, _visit: &mut dyn FnMut(&Ref)) {}

    fn symbol_category(&self, _symbol: SymbolId) -> Option<SymbolCategory> {
        None
    }

    fn has_category(&self, _category: SymbolCategory) -> bool {
        false
    }

    fn symbols_at_location(&self, _file: &SourceFile, _line: usize, _column: usize) -> Vec<String> {
        Vec::new()
    }

    fn find_single_definition(&self, _symbol: &str) -> Option<SymbolLocation> {
        None
    }
}
