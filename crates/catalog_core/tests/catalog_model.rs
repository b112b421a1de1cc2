use catalog_core::{Catalog, CatalogValidationError, ReferenceItem, UNSAVED_ID};

#[test]
fn catalog_new_is_unsaved() {
    let catalog = Catalog::new("Name1", "Description1", 1, 1);

    assert_eq!(catalog.id, UNSAVED_ID);
    assert!(!catalog.is_persisted());
    assert_eq!(catalog.name, "Name1");
    assert_eq!(catalog.description, "Description1");
    assert_eq!(catalog.price, 1);
    assert_eq!(catalog.vat, 1);
}

#[test]
fn validate_accepts_filled_fields_and_any_integers() {
    let catalog = Catalog::new("x", "y", -5, i32::MAX);
    assert_eq!(catalog.validate(), Ok(()));
}

#[test]
fn validate_rejects_blank_name_and_description() {
    let no_name = Catalog::new("  ", "desc", 1, 1);
    assert_eq!(no_name.validate(), Err(CatalogValidationError::BlankName));

    let no_description = Catalog::new("name", "\t\n ", 1, 1);
    assert_eq!(
        no_description.validate(),
        Err(CatalogValidationError::BlankDescription)
    );
}

#[test]
fn validate_reports_name_before_description() {
    let catalog = Catalog::new("", "", 0, 0);
    assert_eq!(catalog.validate(), Err(CatalogValidationError::BlankName));
}

#[test]
fn catalog_serialization_uses_expected_fields() {
    let mut catalog = Catalog::new("chair", "wooden chair", 4000, 20);
    catalog.id = 7;

    let json = serde_json::to_value(&catalog).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "chair");
    assert_eq!(json["description"], "wooden chair");
    assert_eq!(json["price"], 4000);
    assert_eq!(json["vat"], 20);

    let decoded: Catalog = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, catalog);
}

#[test]
fn deserialize_without_id_yields_unsaved_catalog() {
    let value = serde_json::json!({
        "name": "lamp",
        "description": "desk lamp",
        "price": 30,
        "vat": 5
    });

    let catalog: Catalog = serde_json::from_value(value).unwrap();
    assert_eq!(catalog.id, UNSAVED_ID);
}

#[test]
fn reference_item_serializes_code_and_name() {
    let item = ReferenceItem {
        code: 3,
        name: "table".to_string(),
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json, serde_json::json!({ "code": 3, "name": "table" }));
}
