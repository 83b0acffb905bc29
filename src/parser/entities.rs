//! Project, Ref, Enum and TableGroup blocks.

use crate::ast::{Enum, EnumValue, Project, Ref, Relationship, TableGroup};
use crate::lexer::{TokenKind, TokenSource};
use crate::logger::ParseLogger;

use super::{ParseError, Parser};

impl<S: TokenSource, L: ParseLogger> Parser<S, L> {
    pub(super) fn parse_project(&mut self) -> Result<Project, ParseError> {
        let mut project = Project::default();

        self.next();
        if !self.is_name_or_keyword() {
            return Err(self.expect("project_name"));
        }
        project.name = self.lit.clone();

        self.next();
        if self.token != TokenKind::LBrace {
            return Err(self.expect("{"));
        }

        loop {
            self.next();
            match self.token {
                TokenKind::Ident if self.lit == "database_type" => {
                    project.database_type = Some(self.parse_description()?);
                }
                TokenKind::Note => project.note = Some(self.parse_description()?),
                TokenKind::RBrace => return Ok(project),
                _ => return Err(self.expect("database_type")),
            }
        }
    }

    /// `Ref [name]: a > b` or `Ref(s) [name] { a > b ... }`.
    pub(super) fn parse_ref(&mut self) -> Result<Ref, ParseError> {
        let mut r = Ref::default();

        self.next();
        if self.is_name() {
            r.name = Some(self.lit.clone());
            self.next();
        }

        match self.token {
            TokenKind::Colon => {
                self.next();
                r.relationships.push(self.parse_relationship()?);
                Ok(r)
            }
            TokenKind::LBrace => {
                self.next();
                loop {
                    if self.token == TokenKind::RBrace {
                        return Ok(r);
                    }
                    if !self.is_name() {
                        return Err(self.expect("Ref: { from > to }"));
                    }
                    r.relationships.push(self.parse_relationship()?);
                    self.next();
                }
            }
            _ => Err(self.expect("Ref: | Refs {}")),
        }
    }

    /// `<from> <op> <to>`; leaves the cursor on `<to>`.
    fn parse_relationship(&mut self) -> Result<Relationship, ParseError> {
        if !self.is_name() {
            return Err(self.expect("(rel from) table.column_name"));
        }
        let from = self.lit.clone();

        self.next();
        let Some(kind) = self.relationship_kind() else {
            return Err(self.expect("> | < | -"));
        };

        self.next();
        if !self.is_name() {
            return Err(self.expect("(rel to) table.column_name"));
        }

        Ok(Relationship {
            from,
            to: self.lit.clone(),
            kind,
        })
    }

    pub(super) fn parse_enum(&mut self) -> Result<Enum, ParseError> {
        let mut e = Enum::default();

        self.next();
        if !self.is_name_or_keyword() {
            return Err(self.expect("enum name"));
        }
        e.name = self.lit.clone();

        self.next();
        if self.token != TokenKind::LBrace {
            return Err(self.expect("{"));
        }
        self.next();

        while self.is_name_or_keyword() {
            let mut value = EnumValue {
                name: self.lit.clone(),
                note: None,
            };
            self.next();
            if self.token == TokenKind::LBracket {
                self.next();
                if self.token == TokenKind::Note {
                    value.note = Some(self.parse_description()?);
                    self.next();
                }
                if self.token != TokenKind::RBracket {
                    return Err(self.expect("]"));
                }
                self.next();
            }
            e.values.push(value);
        }

        if self.token != TokenKind::RBrace {
            return Err(self.expect("}"));
        }
        Ok(e)
    }

    pub(super) fn parse_table_group(&mut self) -> Result<TableGroup, ParseError> {
        let mut group = TableGroup::default();

        self.next();
        if !self.is_name_or_keyword() {
            return Err(self.expect("table group name"));
        }
        group.name = self.lit.clone();

        self.next();
        if self.token != TokenKind::LBrace {
            return Err(self.expect("{"));
        }
        self.next();

        while self.is_name_or_keyword() {
            group.members.push(self.lit.clone());
            self.next();
        }
        if self.token != TokenKind::RBrace {
            return Err(self.expect("}"));
        }
        Ok(group)
    }
}
