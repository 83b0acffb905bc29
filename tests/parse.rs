use pretty_assertions::assert_eq;

use dbml::ast::{DefaultKind, DefaultValue, Document, IndexType, Relationship, RelationshipKind};

const SHOP: &str = r#"
// Sample store schema
Project shop {
  database_type: 'PostgreSQL'
  Note: 'Online store'
}

Table users as U [headercolor: #3498db] {
  id integer [pk, increment]
  email varchar(255) [unique, not null]
  status user_status [default: 'active']
  balance decimal [default: 0.5]
  created_at timestamp [default: `now()`]
  note: 'Registered customers'
}

Table orders {
  id int [primary key]
  user_id int [ref: > users.id, not null]
  "total amount" int [default: 0]
  paid boolean [default: false]
  coupon varchar [default: null]

  Indexes {
    (user_id, id) [unique, name: 'orders_user', type: btree]
    user_id [type: hash]
  }
}

/* lookup table */
Table project {
  note varchar
  type int
}

Enum user_status {
  active
  banned [note: 'no access']
}

Ref: orders.user_id > users.id

Refs order_links {
  users.id < orders.user_id
  users.id - project.type
}

TableGroup store {
  users
  orders
}
"#;

#[test]
fn parses_full_schema() {
    let doc = dbml::parse(SHOP).unwrap();

    let project = doc.project.as_ref().unwrap();
    assert_eq!(project.name, "shop");
    assert_eq!(project.database_type.as_deref(), Some("PostgreSQL"));
    assert_eq!(project.note.as_deref(), Some("Online store"));

    assert_eq!(doc.tables.len(), 3);
    assert_eq!(doc.enums.len(), 1);
    assert_eq!(doc.refs.len(), 2);
    assert_eq!(doc.table_groups.len(), 1);

    let names: Vec<&str> = doc.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["users", "orders", "project"]);
}

#[test]
fn users_table() {
    let doc = dbml::parse(SHOP).unwrap();
    let users = &doc.tables[0];

    assert_eq!(users.alias.as_deref(), Some("U"));
    assert_eq!(users.settings.header_color.as_deref(), Some("#3498db"));
    assert_eq!(users.note.as_deref(), Some("Registered customers"));
    assert_eq!(users.columns.len(), 5);

    let id = &users.columns[0];
    assert!(id.settings.pk && id.settings.increment);
    assert!(id.settings.null);

    let email = &users.columns[1];
    assert_eq!(email.typ, "varchar(255)");
    assert!(email.settings.unique);
    assert!(!email.settings.null);

    let status = users.columns[2].settings.default.as_ref().unwrap();
    assert_eq!(status.kind, DefaultKind::String);
    assert_eq!(status.value, DefaultValue::Str("active".into()));

    let balance = users.columns[3].settings.default.as_ref().unwrap();
    assert_eq!(balance.kind, DefaultKind::Number);
    assert_eq!(balance.value, DefaultValue::Float(0.5));

    let created = users.columns[4].settings.default.as_ref().unwrap();
    assert_eq!(created.kind, DefaultKind::Expression);
    assert_eq!(created.raw, "now()");
}

#[test]
fn orders_table() {
    let doc = dbml::parse(SHOP).unwrap();
    let orders = &doc.tables[1];

    assert!(orders.columns[0].settings.pk);
    assert_eq!(
        orders.columns[1].settings.reference,
        Some(Relationship {
            from: "orders.user_id".into(),
            to: "users.id".into(),
            kind: RelationshipKind::ManyToOne,
        })
    );
    assert_eq!(orders.columns[2].name, "total amount");
    assert_eq!(
        orders.columns[2].settings.default.as_ref().unwrap().value,
        DefaultValue::Int(0)
    );
    assert_eq!(
        orders.columns[3].settings.default.as_ref().unwrap().value,
        DefaultValue::Bool(false)
    );
    let coupon = orders.columns[4].settings.default.as_ref().unwrap();
    assert_eq!(coupon.kind, DefaultKind::Boolean);
    assert_eq!(coupon.value, DefaultValue::Null);

    assert_eq!(orders.indexes.len(), 2);
    let composite = &orders.indexes[0];
    assert_eq!(composite.fields, vec!["user_id", "id"]);
    assert!(composite.settings.unique);
    assert_eq!(composite.settings.name.as_deref(), Some("orders_user"));
    assert_eq!(composite.settings.kind, Some(IndexType::Btree));
    assert_eq!(orders.indexes[1].settings.kind, Some(IndexType::Hash));
}

#[test]
fn keyword_names() {
    let doc = dbml::parse(SHOP).unwrap();
    let table = &doc.tables[2];
    assert_eq!(table.name, "project");
    assert_eq!(table.columns[0].name, "note");
    assert_eq!(table.columns[1].name, "type");
}

#[test]
fn refs_and_groups() {
    let doc = dbml::parse(SHOP).unwrap();

    assert_eq!(doc.refs[0].name, None);
    assert_eq!(doc.refs[0].relationships.len(), 1);

    let block = &doc.refs[1];
    assert_eq!(block.name.as_deref(), Some("order_links"));
    assert_eq!(block.relationships.len(), 2);
    assert_eq!(block.relationships[0].kind, RelationshipKind::OneToMany);
    assert_eq!(block.relationships[1].kind, RelationshipKind::OneToOne);
    assert_eq!(block.relationships[1].to, "project.type");

    assert_eq!(doc.enums[0].values[1].note.as_deref(), Some("no access"));
    assert_eq!(doc.table_groups[0].members, vec!["users", "orders"]);
}

#[test]
fn duplicate_names_are_not_rejected() {
    let doc = dbml::parse("Table a { id int }\nTable a { id int }\nEnum e { x }\nEnum e { y }").unwrap();
    assert_eq!(doc.tables.len(), 2);
    assert_eq!(doc.enums.len(), 2);
}

#[test]
fn first_error_stops_the_parse() {
    let err = dbml::parse("Table a { id int }\nTable b { id int [pk,,] }\nTable c {}").unwrap_err();
    assert_eq!(err.position(), (2, 22));
    assert_eq!(err.literal(), ",");
}

#[test]
fn logger_receives_params() {
    use std::cell::RefCell;
    use std::fmt::Debug;

    let seen = RefCell::new(Vec::new());
    dbml::parse_with_logger("Enum e { a }", |message: &str, params: &[(&str, &dyn Debug)]| {
        let keys: Vec<String> = params.iter().map(|(k, _)| k.to_string()).collect();
        seen.borrow_mut().push((message.to_string(), keys));
    })
    .unwrap();
    assert_eq!(
        seen.into_inner(),
        vec![("found enum".to_string(), vec!["enum".to_string()])]
    );
}

#[test]
fn document_round_trips_through_json() {
    let doc = dbml::parse(SHOP).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["refs"][1]["relationships"][0]["kind"], "one_to_many");
    assert_eq!(value["tables"][1]["indexes"][0]["settings"]["type"], "btree");
    assert_eq!(value["tables"][0]["columns"][4]["settings"]["default"]["kind"], "expression");

    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
