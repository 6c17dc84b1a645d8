//! End-to-end generation through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use typegen_core::{
    Declaration, Degradation, GenerateError, GenerateOptions, HttpMethod, Specification, TypeRef,
    generate, generate_spec, ir,
};

const STORE_YAML: &str = r##"
openapi: 3.1.0
info:
  title: Order Store
  version: 2.0.0
components:
  schemas:
    Money:
      type: number
    LineItem:
      type: object
      properties:
        sku:
          type: string
        price:
          $ref: "#/components/schemas/Money"
    Order:
      type: object
      properties:
        id:
          type: string
        state:
          type: string
          enum: [open, paid, shipped]
        items:
          type: array
          items:
            $ref: "#/components/schemas/LineItem"
        note:
          type: [string, "null"]
paths:
  /orders:
    parameters: []
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Order"
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/Order"
      responses:
        "201":
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Order"
        "422":
          content:
            application/problem+json:
              schema:
                description: anything goes
  /orders/{orderId}/line-items:
    patch:
      requestBody:
        content:
          application/json:
            schema:
              type: array
              items:
                $ref: "#/components/schemas/LineItem"
      responses:
        "200":
          description: updated
"##;

fn store() -> Specification {
    Specification::from_yaml(STORE_YAML).unwrap()
}

#[test]
fn test_store_declarations() {
    let mut spec = store();
    ir::resolve_specification(&mut spec).unwrap();
    let assembly = ir::assemble(&spec, &GenerateOptions::default()).unwrap();

    assert_eq!(assembly.root, "OrderStore");
    let names: Vec<_> = assembly.declarations.iter().map(Declaration::name).collect();
    assert_eq!(
        names,
        [
            "Money",
            "LineItem",
            "OrderState",
            "OrderItems",
            "Order",
            "OrdersGetResponse200",
            "OrdersGet",
            "OrdersPost",
            "Orders",
            "OrdersOrderIdLineItemsPatchPayload",
            "OrdersOrderIdLineItemsPatch",
            "OrdersOrderIdLineItems",
            "OrderStore",
        ]
    );

    let order = assembly.declaration("Order").unwrap();
    assert_eq!(order.field("note"), Some(&TypeRef::Primitive(ir::Primitive::String)));
    assert_eq!(order.field("items"), Some(&TypeRef::Named("OrderItems".into())));

    let line_item = assembly.declaration("LineItem").unwrap();
    assert_eq!(line_item.field("price"), Some(&TypeRef::Named("Money".into())));
}

#[test]
fn test_store_degradation_is_reported() {
    let generated = generate_spec(store(), &GenerateOptions::default()).unwrap();
    assert_eq!(generated.degradations.len(), 1);
    let Degradation::MalformedContent {
        path,
        method,
        content_type,
        ..
    } = &generated.degradations[0]
    else {
        unreachable!("only malformed content in the store fixture");
    };
    assert_eq!(path, "/orders");
    assert_eq!(*method, HttpMethod::Post);
    assert_eq!(content_type, "application/problem+json");
    assert!(
        generated
            .types
            .contains("  response: { \"201\": Order; \"422\": unknown };\n")
    );
}

#[test]
fn test_store_emitted_text() {
    let generated = generate_spec(store(), &GenerateOptions::default()).unwrap();
    let types = &generated.types;

    assert!(types.starts_with("export type Money = number;\n"));
    assert!(types.contains("export type OrderState = \"open\" | \"paid\" | \"shipped\";\n"));
    assert!(types.contains("export type OrderItems = LineItem[];\n"));
    assert!(types.contains("export type OrdersOrderIdLineItemsPatchPayload = LineItem[];\n"));
    assert!(types.contains(
        "export interface OrdersOrderIdLineItemsPatch {\n  request: OrdersOrderIdLineItemsPatchPayload;\n  response: { \"200\": unknown };\n}\n"
    ));
    assert!(types.ends_with(concat!(
        "export interface OrderStore {\n",
        "  title: \"Order Store\";\n",
        "  version: \"2.0.0\";\n",
        "  Orders: Orders;\n",
        "  OrdersOrderIdLineItems: OrdersOrderIdLineItems;\n",
        "}\n",
    )));
}

#[test]
fn test_generate_from_value_and_yaml_agree() {
    let value: serde_json::Value = serde_yaml::from_str(STORE_YAML).unwrap();
    let from_value = generate(value, &GenerateOptions::default()).unwrap();
    let from_yaml = generate_spec(store(), &GenerateOptions::default()).unwrap();
    assert_eq!(from_value.types, from_yaml.types);
    assert_eq!(from_value.type_root, "OrderStore");
}

#[test]
fn test_cycle_aborts_generation() {
    let json = r##"{
        "info": { "title": "Tree", "version": "1" },
        "components": { "schemas": {
            "Node": { "type": "object", "properties": {
                "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } }
            } }
        } }
    }"##;
    let err = generate_spec(
        Specification::from_json(json).unwrap(),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::SchemaCycle { chain } if chain == "Node -> Node"));
}
