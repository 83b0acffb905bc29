use crate::ast::{ColumnDefault, DefaultKind, DefaultValue};
use crate::lexer::{TokenKind, TokenSource};
use crate::logger::ParseLogger;

use super::{ParseError, Parser};

impl<S: TokenSource, L: ParseLogger> Parser<S, L> {
    /// Type the literal under the cursor as a column default.
    pub(super) fn parse_column_default(&mut self) -> Result<ColumnDefault, ParseError> {
        // `-` is always scanned as an operator; here it signs the number after it
        let raw = if self.token == TokenKind::Sub {
            self.next();
            if !matches!(self.token, TokenKind::Int | TokenKind::Float) {
                return Err(self.expect("number"));
            }
            format!("-{}", self.lit)
        } else {
            self.lit.clone()
        };

        let (value, kind) = match self.token {
            TokenKind::Str | TokenKind::DStr => (DefaultValue::Str(raw.clone()), DefaultKind::String),
            TokenKind::Int => {
                let n = raw
                    .parse::<i64>()
                    .map_err(|e| self.expect(format!("default int value: {e}")))?;
                (DefaultValue::Int(n), DefaultKind::Number)
            }
            TokenKind::Float => {
                let n = raw
                    .parse::<f64>()
                    .map_err(|e| self.expect(format!("default float value: {e}")))?;
                (DefaultValue::Float(n), DefaultKind::Number)
            }
            TokenKind::Expr => (DefaultValue::Expression(raw.clone()), DefaultKind::Expression),
            TokenKind::Ident if raw == "true" => (DefaultValue::Bool(true), DefaultKind::Boolean),
            TokenKind::Ident if raw == "false" => (DefaultValue::Bool(false), DefaultKind::Boolean),
            // null keeps the Boolean tag
            TokenKind::Null => (DefaultValue::Null, DefaultKind::Boolean),
            _ => return Err(self.expect("default value")),
        };

        Ok(ColumnDefault { raw, value, kind })
    }
}
