use std::fmt::Write;

use unicode_width::UnicodeWidthChar;

use crate::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("[{line}:{column}] invalid token '{literal}' determined as {token}, expected: '{expected}'")]
    Syntax {
        line: usize,
        column: usize,
        literal: String,
        token: TokenKind,
        expected: String,
    },
}

impl ParseError {
    pub fn position(&self) -> (usize, usize) {
        let Self::Syntax { line, column, .. } = self;
        (*line, *column)
    }

    pub fn token(&self) -> TokenKind {
        let Self::Syntax { token, .. } = self;
        *token
    }

    pub fn literal(&self) -> &str {
        let Self::Syntax { literal, .. } = self;
        literal
    }

    pub fn expected(&self) -> &str {
        let Self::Syntax { expected, .. } = self;
        expected
    }

    /// Render the error with the offending source line and a caret under
    /// the token. The caret accounts for wide characters and tabs.
    pub fn render(&self, source: &str) -> String {
        let (line, column) = self.position();
        let mut out = format!("error: {self}\n");

        let Some(text) = line.checked_sub(1).and_then(|i| source.lines().nth(i)) else {
            return out;
        };

        let gutter = line.to_string();
        let blank = " ".repeat(gutter.len());
        let pad: String = text
            .chars()
            .take(column.saturating_sub(1))
            .map(|c| match c {
                '\t' => "\t".to_string(),
                c => " ".repeat(c.width().unwrap_or(0)),
            })
            .collect();

        let _ = writeln!(out, "{blank} --> {line}:{column}");
        let _ = writeln!(out, "{blank} |");
        let _ = writeln!(out, "{gutter} | {text}");
        let _ = writeln!(out, "{blank} | {pad}^");
        out
    }
}
