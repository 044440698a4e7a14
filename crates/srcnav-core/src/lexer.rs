//! Lexical classification of file content.

use crate::file::SourceFile;

/// Lexical class of one code unit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    #[default]
    Plain,
    Comment,
    /// String and character literals.
    Quoted,
    Number,
    /// Preprocessor directives.
    Directive,
    Keyword,
}

/// Classifies every code unit of a file.
///
/// Implementations should return exactly `file.len_units()` entries; callers
/// pad or truncate a result of any other length.
pub trait Lexer {
    fn highlight(&self, file: &SourceFile) -> Vec<SyntaxKind>;
}

impl<F> Lexer for F
where
    F: Fn(&SourceFile) -> Vec<SyntaxKind>,
{
    fn highlight(&self, file: &SourceFile) -> Vec<SyntaxKind> {
        self(file)
    }
}

/// Classifies everything as plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainLexer;

impl Lexer for PlainLexer {
    fn highlight(&self, file: &SourceFile) -> Vec<SyntaxKind> {
        vec![SyntaxKind::Plain; file.len_units()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lexer_covers_every_unit() {
        let file = SourceFile::from_text(None, "a😀\n");
        let kinds = PlainLexer.highlight(&file);
        assert_eq!(kinds.len(), 4);
        assert!(kinds.iter().all(|k| *k == SyntaxKind::Plain));
    }

    #[test]
    fn closures_are_lexers() {
        let lexer = |file: &SourceFile| vec![SyntaxKind::Keyword; file.len_units()];
        let file = SourceFile::from_text(None, "int");
        assert_eq!(lexer.highlight(&file), vec![SyntaxKind::Keyword; 3]);
    }
}
