//! Recursive-descent DBML parser.
//!
//! The parser holds a single token of lookahead (`token`/`lit`) and never
//! backtracks. Every entity parser starts with the cursor on its introducing
//! keyword and returns with the cursor on the last token it consumed, so the
//! dispatcher can advance exactly once before inspecting the next block.

mod default;
mod entities;
mod error;
mod table;

use crate::ast::{Document, RelationshipKind};
use crate::lexer::{TokenKind, TokenSource};
use crate::logger::{NoopLogger, ParseLogger, Params};

pub use error::ParseError;

pub struct Parser<S, L = NoopLogger> {
    source: S,
    token: TokenKind,
    lit: String,
    logger: L,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Self::with_logger(source, NoopLogger)
    }
}

impl<S: TokenSource, L: ParseLogger> Parser<S, L> {
    pub fn with_logger(source: S, logger: L) -> Self {
        Self {
            source,
            token: TokenKind::Illegal,
            lit: String::new(),
            logger,
        }
    }

    pub fn parse(&mut self) -> Result<Document, ParseError> {
        let mut doc = Document::default();

        loop {
            self.next();
            match self.token {
                TokenKind::Project => {
                    let project = self.parse_project()?;
                    self.debug("found project", &[("project", &project)]);
                    doc.project = Some(project);
                }
                TokenKind::Table => {
                    let table = self.parse_table()?;
                    self.debug("found table", &[("table", &table)]);
                    doc.tables.push(table);
                }
                TokenKind::Ref | TokenKind::Refs => {
                    let r = self.parse_ref()?;
                    self.debug("found ref", &[("ref", &r)]);
                    doc.refs.push(r);
                }
                TokenKind::Enum => {
                    let e = self.parse_enum()?;
                    self.debug("found enum", &[("enum", &e)]);
                    doc.enums.push(e);
                }
                TokenKind::TableGroup => {
                    let group = self.parse_table_group()?;
                    self.debug("found table group", &[("table_group", &group)]);
                    doc.table_groups.push(group);
                }
                TokenKind::Eof => return Ok(doc),
                _ => {
                    self.debug(
                        "got unexpected token",
                        &[("token", &self.token), ("lit", &self.lit)],
                    );
                    return Err(self.expect("Project, Ref, Table, Enum, TableGroup"));
                }
            }
        }
    }

    /// Advance one token, skipping comments.
    fn next(&mut self) {
        loop {
            let (token, lit) = self.source.read();
            self.token = token;
            self.lit = lit;
            if token != TokenKind::Comment {
                break;
            }
        }
    }

    fn expect(&self, expected: impl Into<String>) -> ParseError {
        let (line, column) = self.source.position();
        ParseError::Syntax {
            line,
            column,
            literal: self.lit.clone(),
            token: self.token,
            expected: expected.into(),
        }
    }

    fn is_name(&self) -> bool {
        self.token == TokenKind::Ident || self.token == TokenKind::DStr
    }

    /// Like `is_name`, but keywords are accepted as well.
    fn is_name_or_keyword(&self) -> bool {
        self.token.is_ident_like() || self.token == TokenKind::DStr
    }

    fn relationship_kind(&self) -> Option<RelationshipKind> {
        match self.token {
            TokenKind::Gtr | TokenKind::Lss | TokenKind::Sub => {
                RelationshipKind::from_operator(&self.lit)
            }
            _ => None,
        }
    }

    /// Advance and read any of the three string kinds.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.next();
        if self.token.is_string() {
            Ok(self.lit.clone())
        } else {
            Err(self.expect("string, double quote string, triple string"))
        }
    }

    /// `: <string>` following a setting key.
    fn parse_description(&mut self) -> Result<String, ParseError> {
        self.next();
        if self.token != TokenKind::Colon {
            return Err(self.expect(":"));
        }
        self.parse_string()
    }

    fn debug(&self, message: &str, params: Params<'_>) {
        self.logger.log(message, params);
    }
}
