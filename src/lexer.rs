//! DBML scanner: turns source text into `(kind, literal)` pairs.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,
    Comment,

    Ident,
    Str,  // 'abc'
    DStr, // "abc"
    TStr, // '''abc'''
    Int,
    Float,
    Expr, // `now()`

    Sub, // -
    Lss, // <
    Gtr, // >

    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Comma,    // ,
    Colon,    // :

    Project,
    Table,
    Ref,
    Refs,
    Enum,
    TableGroup,
    Note,
    As,
    Indexes,
    Pk,
    Primary,
    Key,
    Unique,
    Increment,
    Default,
    Not,
    Null,
    Type,
    HeaderColor,
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Project
                | Self::Table
                | Self::Ref
                | Self::Refs
                | Self::Enum
                | Self::TableGroup
                | Self::Note
                | Self::As
                | Self::Indexes
                | Self::Pk
                | Self::Primary
                | Self::Key
                | Self::Unique
                | Self::Increment
                | Self::Default
                | Self::Not
                | Self::Null
                | Self::Type
                | Self::HeaderColor
        )
    }

    /// Plain identifiers and keywords. Keywords double as names wherever
    /// the grammar position leaves no doubt.
    pub fn is_ident_like(self) -> bool {
        self == Self::Ident || self.is_keyword()
    }

    pub fn is_string(self) -> bool {
        matches!(self, Self::Str | Self::DStr | Self::TStr)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Comment => "COMMENT",
            Self::Ident => "IDENT",
            Self::Str => "STRING",
            Self::DStr => "DSTRING",
            Self::TStr => "TSTRING",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Expr => "EXPR",
            Self::Sub => "-",
            Self::Lss => "<",
            Self::Gtr => ">",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Project => "PROJECT",
            Self::Table => "TABLE",
            Self::Ref => "REF",
            Self::Refs => "REFS",
            Self::Enum => "ENUM",
            Self::TableGroup => "TABLEGROUP",
            Self::Note => "NOTE",
            Self::As => "AS",
            Self::Indexes => "INDEXES",
            Self::Pk => "PK",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Unique => "UNIQUE",
            Self::Increment => "INCREMENT",
            Self::Default => "DEFAULT",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::Type => "TYPE",
            Self::HeaderColor => "HEADERCOLOR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive keyword lookup.
fn keyword_or_ident(s: &str) -> TokenKind {
    match s.to_ascii_lowercase().as_str() {
        "project" => TokenKind::Project,
        "table" => TokenKind::Table,
        "ref" => TokenKind::Ref,
        "refs" => TokenKind::Refs,
        "enum" => TokenKind::Enum,
        "tablegroup" => TokenKind::TableGroup,
        "note" => TokenKind::Note,
        "as" => TokenKind::As,
        "indexes" => TokenKind::Indexes,
        "pk" => TokenKind::Pk,
        "primary" => TokenKind::Primary,
        "key" => TokenKind::Key,
        "unique" => TokenKind::Unique,
        "increment" => TokenKind::Increment,
        "default" => TokenKind::Default,
        "not" => TokenKind::Not,
        "null" => TokenKind::Null,
        "type" => TokenKind::Type,
        "headercolor" => TokenKind::HeaderColor,
        _ => TokenKind::Ident,
    }
}

/// Pull interface the parser reads tokens from.
pub trait TokenSource {
    /// Advance by exactly one token.
    fn read(&mut self) -> (TokenKind, String);

    /// Line and column (1-based) of the most recently read token.
    fn position(&self) -> (usize, usize);
}

pub struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    token_line: usize,
    token_column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Look one character past `peek`.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn read_line_comment(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }

    fn read_block_comment(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.bump() {
            s.push(c);
            if c == '*' && self.peek() == Some('/') {
                s.push('/');
                self.bump();
                break;
            }
        }
        s
    }

    fn read_ident(&mut self, first: char) -> String {
        let mut s = String::from(first);
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '.' {
                s.push(c);
                self.bump();
            } else {
                break;
            }
        }
        s
    }

    fn read_number(&mut self, first: char) -> (TokenKind, String) {
        let mut s = String::from(first);
        let mut kind = TokenKind::Int;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.bump();
            } else if c == '.'
                && kind == TokenKind::Int
                && self.peek_second().is_some_and(|n| n.is_ascii_digit())
            {
                kind = TokenKind::Float;
                s.push(c);
                self.bump();
            } else {
                break;
            }
        }

        // `3498db` and friends: a digit run that keeps going is a name
        if kind == TokenKind::Int
            && self.peek().is_some_and(|c| c.is_alphabetic() || c == '_')
        {
            let rest = self.read_ident('_');
            s.push_str(&rest[1..]);
            return (TokenKind::Ident, s);
        }

        (kind, s)
    }

    /// Read a quoted literal whose opening delimiter is already consumed.
    /// Returns `None` when input ends before the closing delimiter.
    fn read_quoted(&mut self, quote: char) -> Option<String> {
        let mut s = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(s),
                '\\' => match self.bump()? {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    c => s.push(c),
                },
                c => s.push(c),
            }
        }
    }

    fn read_triple_quoted(&mut self) -> Option<String> {
        let mut s = String::new();
        loop {
            match self.bump()? {
                '\'' if self.peek() == Some('\'') && self.peek_second() == Some('\'') => {
                    self.bump();
                    self.bump();
                    return Some(s);
                }
                '\\' => match self.bump()? {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    c => s.push(c),
                },
                c => s.push(c),
            }
        }
    }

    fn read_string(&mut self) -> (TokenKind, String) {
        // Opening `'` already consumed; `''` is either empty or a triple quote.
        if self.peek() == Some('\'') {
            if self.peek_second() == Some('\'') {
                self.bump();
                self.bump();
                return match self.read_triple_quoted() {
                    Some(s) => (TokenKind::TStr, s),
                    None => (TokenKind::Illegal, "'''".to_string()),
                };
            }
            self.bump();
            return (TokenKind::Str, String::new());
        }
        match self.read_quoted('\'') {
            Some(s) => (TokenKind::Str, s),
            None => (TokenKind::Illegal, "'".to_string()),
        }
    }

    pub fn next_token(&mut self) -> (TokenKind, String) {
        self.skip_whitespace();
        self.token_line = self.line;
        self.token_column = self.column;

        let c = match self.bump() {
            Some(c) => c,
            None => return (TokenKind::Eof, String::new()),
        };

        let simple = |kind: TokenKind| (kind, c.to_string());
        match c {
            '{' => simple(TokenKind::LBrace),
            '}' => simple(TokenKind::RBrace),
            '(' => simple(TokenKind::LParen),
            ')' => simple(TokenKind::RParen),
            '[' => simple(TokenKind::LBracket),
            ']' => simple(TokenKind::RBracket),
            ',' => simple(TokenKind::Comma),
            ':' => simple(TokenKind::Colon),
            '>' => simple(TokenKind::Gtr),
            '<' => simple(TokenKind::Lss),
            '-' => simple(TokenKind::Sub),
            '/' if self.peek() == Some('/') => {
                let body = self.read_line_comment();
                (TokenKind::Comment, format!("/{body}"))
            }
            '/' if self.peek() == Some('*') => {
                let body = self.read_block_comment();
                (TokenKind::Comment, format!("/{body}"))
            }
            '\'' => self.read_string(),
            '"' => match self.read_quoted('"') {
                Some(s) => (TokenKind::DStr, s),
                None => simple(TokenKind::Illegal),
            },
            '`' => match self.read_quoted('`') {
                Some(s) => (TokenKind::Expr, s),
                None => simple(TokenKind::Illegal),
            },
            c if c.is_ascii_digit() => self.read_number(c),
            c if c.is_alphabetic() || c == '_' => {
                let ident = self.read_ident(c);
                (keyword_or_ident(&ident), ident)
            }
            _ => simple(TokenKind::Illegal),
        }
    }

    pub fn tokenize(mut self) -> Vec<(TokenKind, String)> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let done = tok.0 == TokenKind::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }
}

impl TokenSource for Scanner<'_> {
    fn read(&mut self) -> (TokenKind, String) {
        self.next_token()
    }

    fn position(&self) -> (usize, usize) {
        (self.token_line, self.token_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Scanner::new(input).tokenize().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = Scanner::new("Table users { }").tokenize();
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Table, "Table".to_string()),
                (TokenKind::Ident, "users".to_string()),
                (TokenKind::LBrace, "{".to_string()),
                (TokenKind::RBrace, "}".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            kinds("table TABLE TableGroup refs headercolor"),
            vec![
                TokenKind::Table,
                TokenKind::Table,
                TokenKind::TableGroup,
                TokenKind::Refs,
                TokenKind::HeaderColor,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dotted_ident() {
        let tokens = Scanner::new("users.id > posts.user_id").tokenize();
        assert_eq!(tokens[0], (TokenKind::Ident, "users.id".to_string()));
        assert_eq!(tokens[1].0, TokenKind::Gtr);
        assert_eq!(tokens[2], (TokenKind::Ident, "posts.user_id".to_string()));
    }

    #[test]
    fn test_numbers() {
        let tokens = Scanner::new("123 123.456 3498db 1.x").tokenize();
        assert_eq!(tokens[0], (TokenKind::Int, "123".to_string()));
        assert_eq!(tokens[1], (TokenKind::Float, "123.456".to_string()));
        assert_eq!(tokens[2], (TokenKind::Ident, "3498db".to_string()));
        assert_eq!(tokens[3], (TokenKind::Int, "1".to_string()));
    }

    #[test]
    fn test_minus_is_always_an_operator() {
        let tokens = Scanner::new("a.id -2fa.id -7").tokenize();
        assert_eq!(tokens[1].0, TokenKind::Sub);
        assert_eq!(tokens[2], (TokenKind::Ident, "2fa.id".to_string()));
        assert_eq!(tokens[3].0, TokenKind::Sub);
        assert_eq!(tokens[4], (TokenKind::Int, "7".to_string()));
    }

    #[test]
    fn test_triple_quoted_escapes() {
        let tokens = Scanner::new(r"'''a\nb\tc \' \\ done'''").tokenize();
        assert_eq!(tokens[0], (TokenKind::TStr, "a\nb\tc ' \\ done".to_string()));
    }

    #[test]
    fn test_strings() {
        let tokens = Scanner::new(r#"'single' "double" '''tri
ple''' `now()` '' 'it\'s'"#)
        .tokenize();
        assert_eq!(tokens[0], (TokenKind::Str, "single".to_string()));
        assert_eq!(tokens[1], (TokenKind::DStr, "double".to_string()));
        assert_eq!(tokens[2], (TokenKind::TStr, "tri\nple".to_string()));
        assert_eq!(tokens[3], (TokenKind::Expr, "now()".to_string()));
        assert_eq!(tokens[4], (TokenKind::Str, String::new()));
        assert_eq!(tokens[5], (TokenKind::Str, "it's".to_string()));
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        assert_eq!(kinds("'oops"), vec![TokenKind::Illegal, TokenKind::Eof]);
    }

    #[test]
    fn test_comments() {
        let tokens = Scanner::new("// line\nTable /* block */ t").tokenize();
        assert_eq!(tokens[0], (TokenKind::Comment, "// line".to_string()));
        assert_eq!(tokens[1].0, TokenKind::Table);
        assert_eq!(tokens[2], (TokenKind::Comment, "/* block */".to_string()));
        assert_eq!(tokens[3].0, TokenKind::Ident);
    }

    #[test]
    fn test_hash_is_illegal() {
        let tokens = Scanner::new("#fff").tokenize();
        assert_eq!(tokens[0], (TokenKind::Illegal, "#".to_string()));
        assert_eq!(tokens[1], (TokenKind::Ident, "fff".to_string()));
    }

    #[test]
    fn test_position() {
        let mut scanner = Scanner::new("Table\n  users {");
        scanner.read();
        assert_eq!(scanner.position(), (1, 1));
        scanner.read();
        assert_eq!(scanner.position(), (2, 3));
        scanner.read();
        assert_eq!(scanner.position(), (2, 9));
    }

    #[test]
    fn test_eof_repeats() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.read().0, TokenKind::Eof);
        assert_eq!(scanner.read().0, TokenKind::Eof);
    }
}
