//! Data model for the source navigator: files and their line index,
//! logical locations, identifier boundaries, and the lexer and
//! symbol-database seams the view is built on.

pub mod encoding;
pub mod file;
pub mod index;
pub mod lexer;
pub mod location;
pub mod symbols;
pub mod word;

pub use file::SourceFile;
pub use index::MemoryIndex;
pub use lexer::{Lexer, PlainLexer, SyntaxKind};
pub use location::{Location, TextRange};
pub use symbols::{NullSymbolSource, Ref, SymbolCategory, SymbolId, SymbolLocation, SymbolSource};
