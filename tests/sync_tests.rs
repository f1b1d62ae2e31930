/// Integration tests for schemabridge
///
/// These tests verify the full field/column lifecycle: construction,
/// write-time mirroring, save, load-time reverse sync and serialization.
/// Run with: cargo test --test sync_tests
use std::collections::BTreeMap;
use std::sync::Arc;

use schemabridge::{
    ColumnDef, DataType, Entity, FieldDef, FieldRegistry, MemoryStore, ModelSchema, NamingRule,
    TableDescriptor, Value,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn company_schema() -> Arc<ModelSchema> {
    ModelSchema::bind(
        "Company",
        FieldRegistry::new(vec![
            FieldDef::new("id", DataType::Integer).with_default(1),
            FieldDef::new("name", DataType::Text),
        ]),
        TableDescriptor::new(
            "company",
            vec![
                ColumnDef::new("_id", DataType::Integer).primary_key(),
                ColumnDef::new("_name", DataType::Text),
            ],
        )
        .unwrap(),
        NamingRule::Prefix("_".into()),
        BTreeMap::new(),
    )
    .unwrap()
}

fn person_schema() -> Arc<ModelSchema> {
    let mut aliases = BTreeMap::new();
    aliases.insert("company_id".to_string(), "_company_id".to_string());

    ModelSchema::bind(
        "Person",
        FieldRegistry::new(vec![
            FieldDef::new("id", DataType::Integer).with_default(1),
            FieldDef::new("name", DataType::Text),
            FieldDef::new("company_id", DataType::Integer),
        ]),
        TableDescriptor::new(
            "person",
            vec![
                ColumnDef::new("_id", DataType::Integer).primary_key(),
                ColumnDef::new("_name", DataType::Text),
                ColumnDef::new("_company_id", DataType::Integer),
            ],
        )
        .unwrap(),
        NamingRule::Prefix("_".into()),
        aliases,
    )
    .unwrap()
}

fn fixture_company(schema: Arc<ModelSchema>) -> Entity {
    let mut company = Entity::new(schema).unwrap();
    company.set("id", 2).unwrap();
    company.set("name", "nKey").unwrap();
    company.validate().unwrap();
    company
}

fn fixture_person(schema: Arc<ModelSchema>) -> Entity {
    let mut values = BTreeMap::new();
    values.insert("name".to_string(), Value::Text("Paul Eipper".into()));
    Entity::with_values(schema, values).unwrap()
}

#[test]
fn test_construction_consistency() {
    init_logging();
    let company = Entity::new(company_schema()).unwrap();
    // Default id 1 is already pushed into the persisted store.
    assert_eq!(company.column("_id"), Some(&Value::Integer(1)));
}

#[test]
fn test_write_synchronization() {
    let mut company = Entity::new(company_schema()).unwrap();
    company.set("name", "nKey").unwrap();
    assert_eq!(company.column("_name"), Some(&Value::Text("nKey".into())));
}

#[test]
fn test_simulated_load_serializes_stored_values() {
    let mut stored = BTreeMap::new();
    stored.insert("_id".to_string(), Value::Integer(2));
    stored.insert("_name".to_string(), Value::Text("Acme".into()));

    let company = Entity::from_stored(company_schema(), stored).unwrap();
    let out = company.serialize();
    assert_eq!(out.get("id"), Some(&Value::Integer(2)));
    assert_eq!(out.get("name"), Some(&Value::Text("Acme".into())));
}

#[test]
fn test_load_idempotence() {
    let schema = company_schema();
    let mut store = MemoryStore::new();
    let id = store.save(&fixture_company(schema.clone()));

    let first = store.load(schema.clone(), id).unwrap();
    let second = store.load(schema, id).unwrap();
    assert_eq!(first.serialize(), second.serialize());
}

#[test]
fn test_insert_then_load_round_trip() {
    let company_schema = company_schema();
    let person_schema = person_schema();
    let mut store = MemoryStore::new();

    let p = fixture_person(person_schema.clone());
    let c = fixture_company(company_schema.clone());
    let p_id = store.save(&p);
    let c_id = store.save(&c);

    let p_loaded = store.load(person_schema.clone(), p_id).unwrap();
    let c_loaded = store.load(company_schema.clone(), c_id).unwrap();

    assert_eq!(
        p_loaded.serialize(),
        fixture_person(person_schema).serialize()
    );
    assert_eq!(
        c_loaded.serialize(),
        fixture_company(company_schema).serialize()
    );
}

#[test]
fn test_round_trip_through_deserialize() {
    let schema = company_schema();
    let company = fixture_company(schema.clone());

    let rebuilt = Entity::deserialize(schema, company.serialize()).unwrap();
    assert_eq!(rebuilt.serialize(), company.serialize());
}

#[test]
fn test_relationship_foreign_key_mirrors() {
    let company = fixture_company(company_schema());
    let mut person = fixture_person(person_schema());

    person.set_reference("company_id", &company).unwrap();
    assert_eq!(person.get("company_id"), Some(&Value::Integer(2)));
    assert_eq!(person.column("_company_id"), Some(&Value::Integer(2)));
}

#[test]
fn test_load_all_preserves_insertion_order() {
    let schema = company_schema();
    let mut store = MemoryStore::new();
    for name in ["first", "second"] {
        let mut c = Entity::new(schema.clone()).unwrap();
        c.set("name", name).unwrap();
        store.save(&c);
    }

    let loaded = store.load_all(schema).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].get("name"), Some(&Value::Text("first".into())));
    assert_eq!(loaded[1].get("name"), Some(&Value::Text("second".into())));
}

#[test]
fn test_unlinked_model_round_trips_nothing() {
    // No naming rule and no aliases: a valid configuration where fields
    // and columns are fully independent.
    let schema = ModelSchema::bind(
        "Detached",
        FieldRegistry::new(vec![FieldDef::new("name", DataType::Text)]),
        TableDescriptor::new("detached", vec![ColumnDef::new("name", DataType::Text)]).unwrap(),
        NamingRule::Independent,
        BTreeMap::new(),
    )
    .unwrap();

    let mut entity = Entity::new(schema).unwrap();
    entity.set("name", "invisible").unwrap();
    assert!(entity.columns().is_empty());
}

#[test]
fn test_serialize_to_json() {
    let company = fixture_company(company_schema());
    let json = company.to_json().unwrap();
    assert_eq!(json["id"], serde_json::json!(2));
    assert_eq!(json["name"], serde_json::json!("nKey"));
}
