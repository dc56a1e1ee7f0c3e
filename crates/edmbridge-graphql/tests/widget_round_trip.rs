//! CSDL document to SDL text, through the mediation schema.

use edmbridge_csdl::{Edmx, EntityContainer, EntityType, EnumType, Property, Schema};
use edmbridge_graphql::{SdlConfig, generate_sdl};
use edmbridge_mediation::{MediationConfig, Service, map_document};

fn widget_document() -> Edmx {
    Edmx::new([Schema::new("Demo")
        .with_entity_type(
            EntityType::new("Widget")
                .with_key(["id"])
                .with_property(Property::new("id", "Edm.String").nullable(false))
                .with_property(Property::new("name", "Edm.String").nullable(false)),
        )
        .with_entity_container(
            EntityContainer::new("Shop").with_entity_set("Widgets", "Demo.Widget"),
        )])
}

fn widget_service() -> Service {
    map_document(&widget_document(), &MediationConfig::default()).unwrap()
}

#[test]
fn test_widget_sdl_contents() {
    let sdl = generate_sdl(&widget_service(), &SdlConfig::default()).unwrap();

    assert!(sdl.contains("type Widget {\n    id: ID\n    name: String!\n}"));
    assert!(sdl.contains("input WidgetInput {\n    name: String\n}"));
    assert!(sdl.contains("    widget(id: ID!): Widget\n"));
    assert!(sdl.contains("    widgets(filter: String, sort: String): [Widget]\n"));
    assert!(sdl.contains("    addWidget(data: WidgetInput!): Widget @backend("));
    assert!(sdl.contains("    updateWidget(id: ID!, data: WidgetInput!): Boolean @backend("));
    assert!(sdl.contains("    removeWidget(id: ID!): Boolean @backend("));
}

#[test]
fn test_widget_sdl_exact_layout() {
    let config = SdlConfig::default().with_product("shop");
    let sdl = generate_sdl(&widget_service(), &config).unwrap();

    let expected = r#"directive @backend(product: String, collection: String, method: String, endpoint: String) on OBJECT | FIELD_DEFINITION
directive @connection(primaryKey: String, foreignKey: String) on FIELD_DEFINITION

type Query {
    widget(id: ID!): Widget
    widgets(filter: String, sort: String): [Widget]
}

type Mutation {
    addWidget(data: WidgetInput!): Widget @backend(product: "shop", collection: "Widgets", method: "POST")
    updateWidget(id: ID!, data: WidgetInput!): Boolean @backend(product: "shop", collection: "Widgets", method: "PATCH")
    removeWidget(id: ID!): Boolean @backend(product: "shop", collection: "Widgets", method: "DELETE")
}

type Widget {
    id: ID
    name: String!
}

input WidgetInput {
    name: String
}
"#;

    assert_eq!(sdl, expected);
}

#[test]
fn test_sdl_from_persisted_service() {
    let service = widget_service();
    let json = service.to_json_pretty().unwrap();
    let reloaded = Service::from_json_str(&json).unwrap();

    let config = SdlConfig::default();
    assert_eq!(
        generate_sdl(&service, &config).unwrap(),
        generate_sdl(&reloaded, &config).unwrap()
    );
}

#[test]
fn test_enum_defaults_render() {
    let mut document = widget_document();
    document.data_services.schemas[0]
        .enum_types
        .push(EnumType::new("Color").with_member("Red", "0").with_member("Green", "1"));

    let service = map_document(&document, &MediationConfig::default()).unwrap();
    assert_eq!(service.types["Demo.Color"].as_enum().unwrap().values_type, "int32");

    let config = SdlConfig {
        enum_provenance: true,
        ..SdlConfig::default()
    };
    let sdl = generate_sdl(&service, &config).unwrap();
    assert!(sdl.contains("directive @enumValue(value: String, type: String) on ENUM_VALUE\n"));
    assert!(sdl.contains(
        "enum Color {\n    Red @enumValue(value: \"0\", type: \"int32\")\n    Green @enumValue(value: \"1\", type: \"int32\")\n}"
    ));
}
