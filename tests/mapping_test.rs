use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

use automapper::{
    project, project_typed, ConversionEntry, MapperError, MappingProfile, ProjectionConfig,
    Projector, Record, Registry, TypeKey, Value,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct UserEntity {
    id: u64,
    name: String,
    password_hash: String,
    address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Address {
    city: String,
    zip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: u64,
    name: String,
    address: Address,
    #[serde(default)]
    display_name: Option<String>,
}

fn entity() -> UserEntity {
    UserEntity {
        id: 7,
        name: "Joe".to_string(),
        password_hash: "x1y2".to_string(),
        address: Address {
            city: "Oslo".to_string(),
            zip: "0150".to_string(),
        },
    }
}

fn dto_config() -> ProjectionConfig {
    ProjectionConfig::new()
        .with_copy_objects(true)
        .with_ignore(["passwordHash"])
}

struct UserProfile;

impl MappingProfile for UserProfile {
    fn entries(&self) -> Vec<ConversionEntry> {
        vec![ConversionEntry::between(|user: &UserEntity| {
            let mut dto: UserDto = project_typed(user, &dto_config())
                .unwrap_or_else(|e| panic!("projection failed: {}", e));
            dto.display_name = Some(format!("{} ({})", dto.name, dto.address.city));
            dto
        })]
    }
}

#[test]
fn conversion_functions_compose_with_the_projector() -> Result<()> {
    let mut registry = Registry::new();
    registry.add_profile(&UserProfile)?;

    let dto: UserDto = registry.convert_between(&entity())?;

    assert_eq!(
        dto,
        UserDto {
            id: 7,
            name: "Joe".to_string(),
            address: entity().address,
            display_name: Some("Joe (Oslo)".to_string()),
        }
    );
    Ok(())
}

#[test]
fn registering_a_profile_twice_fails() -> Result<()> {
    let mut registry = Registry::new();
    registry.add_profile(&UserProfile)?;

    let err = registry.add_profile(&UserProfile).unwrap_err();

    assert!(matches!(err, MapperError::DuplicateMapping { .. }));
    assert_eq!(registry.len(), 1);
    Ok(())
}

#[test]
fn explicit_keys_dispatch_dynamic_records() -> Result<()> {
    let order = TypeKey::new("Order");
    let summary = TypeKey::new("OrderSummary");

    let mut registry = Registry::new();
    registry.register([ConversionEntry::new(
        order.clone(),
        summary.clone(),
        |source: &Value| {
            let config = ProjectionConfig::new().with_select(["id", "total"]);
            project(source, Record::new(), &config)
        },
    )])?;

    let source = Value::from(json!({"id": 12, "total": 9.5, "lines": [1, 2], "note": "gift"}));
    let projected: automapper::Result<Value> = registry.convert(&order, &summary, &source)?;

    assert_eq!(projected?, Value::from(json!({"id": 12, "total": 9.5})));
    assert!(registry.resolve(&summary, &order).is_none());
    Ok(())
}

#[test]
fn projector_is_reusable_across_sources() -> Result<()> {
    let config = ProjectionConfig::new()
        .with_select(["name", "pets"])
        .with_copy_arrays(true);
    let projector = Projector::new(&config);

    let first = projector.project(&Value::from(json!({"name": "Ann", "age": 3, "pets": ["cat"]})), Record::new())?;
    let second = projector.project(&Value::from(json!({"name": "Bob", "pets": []})), Record::new())?;

    assert_eq!(first, Value::from(json!({"name": "Ann", "pets": ["cat"]})));
    assert_eq!(second, Value::from(json!({"name": "Bob", "pets": []})));
    Ok(())
}

#[test]
fn merge_keeps_destination_properties() -> Result<()> {
    let source = Value::from(json!({"prop1": "abc", "prop2": 123}));
    let destination = match Value::from(json!({"prop2": 444, "prop3": "345"})) {
        Value::Record(record) => record,
        other => panic!("expected a record, got {:?}", other),
    };

    let merged = project(&source, destination, &ProjectionConfig::new())?;

    assert_eq!(merged, Value::from(json!({"prop2": 123, "prop3": "345"})));
    Ok(())
}

#[test]
fn array_sources_are_rejected() {
    let err = project(&Value::from(json!([])), Record::new(), &ProjectionConfig::new()).unwrap_err();

    assert!(matches!(err, MapperError::InvalidSourceKind));
    assert_eq!(
        err.to_string(),
        "auto mapping is not available when the source object is an array"
    );
}

#[test]
fn current_registry_is_replaced_wholesale() -> Result<()> {
    use automapper::registry::current;

    let first = Registry::new_current();
    current::register([ConversionEntry::between(|n: &u8| u16::from(*n) * 2)])?;
    assert_eq!(current::convert::<u8, u16>(&TypeKey::of::<u8>(), &TypeKey::of::<u16>(), &21)?, 42);

    Registry::new_current();
    let err = current::convert::<u8, u16>(&TypeKey::of::<u8>(), &TypeKey::of::<u16>(), &21).unwrap_err();

    assert!(matches!(err, MapperError::UnregisteredMapping { .. }));
    assert_eq!(first.read().map(|registry| registry.len()).unwrap_or_default(), 1);
    Ok(())
}
