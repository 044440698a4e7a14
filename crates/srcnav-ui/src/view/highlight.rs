/// Lexical classification using syntect grammars.
use std::path::Path;

use srcnav_core::{Lexer, SourceFile, SyntaxKind};
use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Scope prefixes in priority order: an enclosing comment or string wins
/// over anything nested in it, and a directive line keeps its color over the
/// keywords and numbers inside it.
const SCOPE_KINDS: &[(&str, SyntaxKind)] = &[
    ("comment", SyntaxKind::Comment),
    ("string", SyntaxKind::Quoted),
    ("constant.character", SyntaxKind::Quoted),
    ("meta.preprocessor", SyntaxKind::Directive),
    ("constant.numeric", SyntaxKind::Number),
    ("keyword.control", SyntaxKind::Keyword),
    ("keyword.other", SyntaxKind::Keyword),
    ("storage.type", SyntaxKind::Keyword),
    ("storage.modifier", SyntaxKind::Keyword),
];

/// Syntect-backed [`Lexer`] that picks a grammar from the file name.
pub struct SyntectLexer {
    syntax_set: SyntaxSet,
    scopes: Vec<(Scope, SyntaxKind)>,
}

impl Default for SyntectLexer {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectLexer {
    /// Creates a lexer with syntect's bundled grammars.
    pub fn new() -> Self {
        let scopes = SCOPE_KINDS
            .iter()
            .filter_map(|(name, kind)| Some((Scope::new(name).ok()?, *kind)))
            .collect();
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            scopes,
        }
    }

    /// Detects the syntax for a file based on its extension, its file name
    /// or its first line.
    pub fn detect_syntax(&self, file_path: Option<&Path>, first_line: &str) -> &SyntaxReference {
        if let Some(path) = file_path {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if let Some(syntax) = self.syntax_set.find_syntax_by_extension(ext) {
                    return syntax;
                }
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if let Some(syntax) = self.syntax_set.find_syntax_by_extension(name) {
                    return syntax;
                }
            }
        }
        self.syntax_set
            .find_syntax_by_first_line(first_line)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn classify(&self, stack: &ScopeStack) -> SyntaxKind {
        let scopes = stack.as_slice();
        self.scopes
            .iter()
            .find(|(prefix, _)| scopes.iter().any(|s| prefix.is_prefix_of(*s)))
            .map_or(SyntaxKind::Plain, |(_, kind)| *kind)
    }
}

impl Lexer for SyntectLexer {
    fn highlight(&self, file: &SourceFile) -> Vec<SyntaxKind> {
        let text = file.content();
        let first_line = text.lines().next().unwrap_or_default();
        let syntax = self.detect_syntax(file.path(), first_line);

        let mut kinds = Vec::with_capacity(file.len_units());
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();

        for line in LinesWithEndings::from(text) {
            let ops = match state.parse_line(line, &self.syntax_set) {
                Ok(ops) => ops,
                Err(e) => {
                    tracing::warn!("highlighting stopped in {}: {e}", file.display_name());
                    break;
                }
            };
            for (range, op) in ScopeRangeIterator::new(&ops, line) {
                if let Err(e) = stack.apply(op) {
                    tracing::warn!("bad scope op in {}: {e:?}", file.display_name());
                }
                if range.is_empty() {
                    continue;
                }
                let kind = self.classify(&stack);
                let units = line[range].encode_utf16().count();
                kinds.extend(std::iter::repeat_n(kind, units));
            }
        }

        kinds.resize(file.len_units(), SyntaxKind::Plain);
        kinds
    }
}
