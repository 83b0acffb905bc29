use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Last `Project` block wins when several are declared.
    pub project: Option<Project>,
    pub tables: Vec<Table>,
    pub refs: Vec<Ref>,
    pub enums: Vec<Enum>,
    pub table_groups: Vec<TableGroup>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub note: Option<String>,
    pub database_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub alias: Option<String>,
    pub note: Option<String>,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub settings: TableSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSettings {
    /// `#rrggbb`-shaped, `#` included.
    pub header_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Raw type text; a size argument is kept inline, e.g. `varchar(255)`.
    pub typ: String,
    pub settings: ColumnSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSettings {
    pub pk: bool,
    pub unique: bool,
    pub increment: bool,
    pub null: bool,
    pub note: Option<String>,
    pub reference: Option<Relationship>,
    pub default: Option<ColumnDefault>,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            pk: false,
            unique: false,
            increment: false,
            null: true,
            note: None,
            reference: None,
            default: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDefault {
    pub raw: String,
    pub value: DefaultValue,
    pub kind: DefaultKind,
}

// An expression serializes as a bare string; `kind` restores the variant.
impl<'de> Deserialize<'de> for ColumnDefault {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            raw: String,
            value: DefaultValue,
            kind: DefaultKind,
        }
        let helper = Helper::deserialize(deserializer)?;
        let value = match (helper.kind, helper.value) {
            (DefaultKind::Expression, DefaultValue::Str(s)) => DefaultValue::Expression(s),
            (_, value) => value,
        };
        Ok(Self {
            raw: helper.raw,
            value,
            kind: helper.kind,
        })
    }
}

/// Externally visible default tag. Integers and floats share `Number`;
/// `null` is reported as `Boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultKind {
    Unknown,
    Number,
    String,
    Expression,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Index {
    pub fields: Vec<String>,
    pub settings: IndexSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexSettings {
    pub name: Option<String>,
    pub note: Option<String>,
    pub pk: bool,
    pub unique: bool,
    #[serde(rename = "type")]
    pub kind: Option<IndexType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    Hash,
    Btree,
}

impl IndexType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hash" => Some(Self::Hash),
            "btree" => Some(Self::Btree),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Btree => "btree",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// `table.column`, kept as written.
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    ManyToOne, // >
    OneToMany, // <
    OneToOne,  // -
}

impl RelationshipKind {
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            ">" => Some(Self::ManyToOne),
            "<" => Some(Self::OneToMany),
            "-" => Some(Self::OneToOne),
            _ => None,
        }
    }

    pub fn operator(self) -> &'static str {
        match self {
            Self::ManyToOne => ">",
            Self::OneToMany => "<",
            Self::OneToOne => "-",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.kind, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ref {
    pub name: Option<String>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableGroup {
    pub name: String,
    pub members: Vec<String>,
}
