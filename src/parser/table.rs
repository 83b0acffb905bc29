//! `Table` blocks: columns, column settings, indexes and table settings.

use crate::ast::{Column, ColumnSettings, Index, IndexType, Relationship, Table, TableSettings};
use crate::lexer::{TokenKind, TokenSource};
use crate::logger::ParseLogger;

use super::{ParseError, Parser};

/// Letters and digits only; lets keywords stand in as table names.
fn is_plain_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

impl<S: TokenSource, L: ParseLogger> Parser<S, L> {
    pub(super) fn parse_table(&mut self) -> Result<Table, ParseError> {
        let mut table = Table::default();

        self.next();
        if !self.is_name() && !is_plain_word(&self.lit) {
            return Err(self.expect("table name"));
        }
        table.name = self.lit.clone();
        self.next();

        // alias, settings and body are optional in that order; each phase
        // leaves the cursor on the entry token of the next one
        if self.token == TokenKind::As {
            self.next();
            match self.token {
                TokenKind::Ident | TokenKind::Str | TokenKind::DStr => {
                    table.alias = Some(self.lit.clone());
                }
                _ => return Err(self.expect("as NAME")),
            }
            self.next();
        }

        if self.token == TokenKind::LBracket {
            self.parse_table_settings(&mut table)?;
            self.next(); // pop ']'
        }

        if self.token != TokenKind::LBrace {
            return Err(self.expect("{"));
        }
        self.next();

        loop {
            match self.token {
                TokenKind::Indexes => {
                    let indexes = self.parse_indexes()?;
                    table.indexes.extend(indexes);
                }
                TokenKind::RBrace => return Ok(table),
                TokenKind::Eof => return Err(self.expect("}")),
                _ => {
                    if !self.is_name_or_keyword() {
                        return Err(self.expect("column name"));
                    }
                    let name = self.lit.clone();
                    let leading = self.token;
                    self.next();

                    if leading == TokenKind::Note && self.token == TokenKind::Colon {
                        table.note = Some(self.parse_string()?);
                        self.next();
                    } else {
                        let column = self.parse_column(name, &table.name)?;
                        table.columns.push(column);
                    }
                }
            }
        }
    }

    /// `[headercolor: #rrggbb, note: '...']`, cursor on `[`. Returns on `]`.
    fn parse_table_settings(&mut self, table: &mut Table) -> Result<(), ParseError> {
        let mut settings = TableSettings::default();
        let mut comma_allowed = false;

        loop {
            self.next();
            match self.token {
                TokenKind::RBracket => {
                    table.settings = settings;
                    return Ok(());
                }
                TokenKind::Comma => {
                    if !comma_allowed {
                        return Err(self.expect("headercolor | note"));
                    }
                    comma_allowed = false;
                    continue;
                }
                _ if comma_allowed => return Err(self.expect(", | ]")),
                TokenKind::HeaderColor => {
                    self.next();
                    if self.token != TokenKind::Colon {
                        return Err(self.expect(":"));
                    }
                    self.next();
                    if self.token != TokenKind::Illegal || self.lit != "#" {
                        return Err(self.expect("#"));
                    }
                    self.next();
                    if self.token != TokenKind::Ident && self.token != TokenKind::Int {
                        return Err(self.expect("color string"));
                    }
                    settings.header_color = Some(format!("#{}", self.lit));
                }
                TokenKind::Note => {
                    table.note = Some(self.parse_description()?);
                }
                _ => return Err(self.expect("headercolor | note")),
            }
            comma_allowed = true;
        }
    }

    /// `<type> [(<int>)]? [<settings>]?`, cursor on the type. Leaves the
    /// cursor on the token after the column.
    fn parse_column(&mut self, name: String, table: &str) -> Result<Column, ParseError> {
        if self.token != TokenKind::Ident {
            return Err(self.expect("int, varchar,..."));
        }
        let mut typ = self.lit.clone();
        self.next();

        if self.token == TokenKind::LParen {
            self.next();
            if self.token != TokenKind::Int {
                return Err(self.expect("int"));
            }
            typ = format!("{typ}({})", self.lit);
            self.next();
            if self.token != TokenKind::RParen {
                return Err(self.expect(")"));
            }
            self.next();
        }

        let mut settings = ColumnSettings::default();
        if self.token == TokenKind::LBracket {
            settings = self.parse_column_settings(&format!("{table}.{name}"))?;
            self.next(); // pop ']'
        }

        let column = Column {
            name,
            typ,
            settings,
        };
        self.debug("found column", &[("column", &column)]);
        Ok(column)
    }

    /// Cursor on `[`; returns on `]`. `owner` is the `table.column` an
    /// inline ref starts from.
    fn parse_column_settings(&mut self, owner: &str) -> Result<ColumnSettings, ParseError> {
        let mut settings = ColumnSettings::default();
        let mut comma_allowed = false;

        loop {
            self.next();
            match self.token {
                TokenKind::RBracket => return Ok(settings),
                TokenKind::Comma => {
                    if !comma_allowed {
                        return Err(self.expect("pk | primary key | unique"));
                    }
                    comma_allowed = false;
                    continue;
                }
                _ if comma_allowed => return Err(self.expect(", | ]")),
                TokenKind::Pk => settings.pk = true,
                TokenKind::Primary => {
                    self.next();
                    if self.token != TokenKind::Key {
                        return Err(self.expect("key"));
                    }
                    settings.pk = true;
                }
                TokenKind::Ref => {
                    self.next();
                    if self.token != TokenKind::Colon {
                        return Err(self.expect(":"));
                    }
                    self.next();
                    let Some(kind) = self.relationship_kind() else {
                        return Err(self.expect("< | > | -"));
                    };
                    self.next();
                    if !self.is_name() {
                        return Err(self.expect("table.column_id"));
                    }
                    settings.reference = Some(Relationship {
                        from: owner.to_string(),
                        to: self.lit.clone(),
                        kind,
                    });
                }
                TokenKind::Not => {
                    self.next();
                    if self.token != TokenKind::Null {
                        return Err(self.expect("null"));
                    }
                    settings.null = false;
                }
                TokenKind::Unique => settings.unique = true,
                TokenKind::Increment => settings.increment = true,
                TokenKind::Default => {
                    self.next();
                    if self.token != TokenKind::Colon {
                        return Err(self.expect(":"));
                    }
                    self.next();
                    settings.default = Some(self.parse_column_default()?);
                }
                TokenKind::Note => settings.note = Some(self.parse_description()?),
                _ => return Err(self.expect("pk, primary key, unique")),
            }
            comma_allowed = true;
        }
    }

    /// `Indexes { ... }`, cursor on `Indexes`. Leaves the cursor after `}`.
    fn parse_indexes(&mut self) -> Result<Vec<Index>, ParseError> {
        let mut indexes = Vec::new();

        self.next();
        if self.token != TokenKind::LBrace {
            return Err(self.expect("{"));
        }
        self.next();

        loop {
            if self.token == TokenKind::RBrace {
                self.next(); // pop '}'
                return Ok(indexes);
            }
            let index = self.parse_index()?;
            self.debug("found index", &[("index", &index)]);
            indexes.push(index);
        }
    }

    fn is_index_field(&self) -> bool {
        self.token.is_ident_like() || matches!(self.token, TokenKind::DStr | TokenKind::Expr)
    }

    fn index_field(&self) -> String {
        match self.token {
            TokenKind::Expr => format!("`{}`", self.lit),
            _ => self.lit.clone(),
        }
    }

    /// One entry of an `Indexes` block. Leaves the cursor on the token
    /// after the entry.
    fn parse_index(&mut self) -> Result<Index, ParseError> {
        let mut index = Index::default();

        if self.token == TokenKind::LParen {
            self.next();
            loop {
                if !self.is_index_field() {
                    return Err(self.expect("field_name"));
                }
                index.fields.push(self.index_field());
                self.next();
                match self.token {
                    TokenKind::Comma => self.next(),
                    TokenKind::RParen => break,
                    _ => return Err(self.expect(", | )")),
                }
            }
        } else if self.is_index_field() {
            index.fields.push(self.index_field());
        } else {
            return Err(self.expect("field_name"));
        }
        self.next();

        if self.token != TokenKind::LBracket {
            return Ok(index);
        }

        let mut comma_allowed = false;
        loop {
            self.next();
            match self.token {
                TokenKind::RBracket => {
                    self.next(); // pop ']'
                    return Ok(index);
                }
                TokenKind::Comma => {
                    if !comma_allowed {
                        return Err(self.expect("[index settings...]"));
                    }
                    comma_allowed = false;
                    continue;
                }
                _ if comma_allowed => return Err(self.expect(", | ]")),
                TokenKind::Ident if self.lit.eq_ignore_ascii_case("name") => {
                    index.settings.name = Some(self.parse_description()?);
                }
                TokenKind::Note => index.settings.note = Some(self.parse_description()?),
                TokenKind::Pk => index.settings.pk = true,
                TokenKind::Unique => index.settings.unique = true,
                TokenKind::Type => {
                    self.next();
                    if self.token != TokenKind::Colon {
                        return Err(self.expect(":"));
                    }
                    self.next();
                    let kind = match self.token {
                        TokenKind::Ident => IndexType::from_str(&self.lit),
                        _ => None,
                    };
                    let Some(kind) = kind else {
                        return Err(self.expect("hash|btree"));
                    };
                    index.settings.kind = Some(kind);
                }
                _ => return Err(self.expect("note|name|type|pk|unique")),
            }
            comma_allowed = true;
        }
    }
}
