use crate::api::RequestError;
use crate::form::{Mode, ProductForm};
use crate::model::{NewOrder, NewOrderItem, Order, Product, Supplier};
use crate::session::{Options, Session, SessionError};
use crate::view::{self, ListView, ORDER_HEADERS, PRODUCT_HEADERS};

fn sample_products() -> Vec<Product> {
    let payload = br#"{"data":[
        {"_id":"64f1c2a9d3e8b90012ab34cd","sku":"A1","name":"Widget","price":9.5,"stock":3,"category":"tools","description":"a widget"},
        {"_id":"64f1c2a9d3e8b90012ab34ce","sku":"B2","name":"Gadget","price":120,"stock":0,"category":"electronics","description":""}
    ]}"#;
    crate::api::decode_data(payload).unwrap()
}

#[test]
fn list_render_matches_fetched_collection() {
    let products = sample_products();
    let rows = view::product_rows(&products, "₱");
    assert_eq!(rows.len(), products.len());
    assert_eq!(rows[0][1], "A1");
    assert_eq!(rows[0][2], "Widget");
    assert_eq!(rows[0][3], "₱9.5");
    assert_eq!(rows[0][4], "3");
    assert_eq!(rows[1][3], "₱120");

    let mut table = ListView::new("products", PRODUCT_HEADERS);
    let generation = table.begin_load();
    assert!(table.apply(generation, rows));
    assert_eq!(table.row_count(), 2);
}

#[test]
fn reloading_an_unchanged_list_renders_identically() {
    let products = sample_products();
    let mut table = ListView::new("products", PRODUCT_HEADERS);

    let generation = table.begin_load();
    table.apply(generation, view::product_rows(&products, "₱"));
    let first = table.render();

    let generation = table.begin_load();
    table.apply(generation, view::product_rows(&products, "₱"));
    let second = table.render();

    assert_eq!(first, second);
}

#[test]
fn stale_refresh_never_overwrites_a_newer_one() {
    let mut table = ListView::new("products", PRODUCT_HEADERS);
    let older = table.begin_load();
    let newer = table.begin_load();

    // The newer request resolves first; the slow older one must be dropped.
    assert!(table.apply(newer, vec![vec!["new".to_string(); 6]]));
    assert!(!table.apply(older, vec![vec!["old".to_string(); 6]]));
    assert_eq!(table.rows()[0][0], "new");
}

#[test]
fn create_body_carries_coerced_numbers() {
    let form = ProductForm {
        sku: "A1".to_string(),
        name: "Widget".to_string(),
        price: "9.5".to_string(),
        stock: "3".to_string(),
        category: "tools".to_string(),
        ..Default::default()
    };
    let draft = form.submit().unwrap();
    let body = serde_json::to_value(&draft).unwrap();
    assert_eq!(body["price"], serde_json::json!(9.5));
    assert_eq!(body["stock"], serde_json::json!(3));
    assert_eq!(body["sku"], serde_json::json!("A1"));
    assert!(body.get("_id").is_none());
}

#[test]
fn edit_populates_fields_and_scopes_the_update() {
    let product = sample_products().remove(0);
    let mut form = ProductForm::default();
    assert_eq!(form.mode, Mode::Create);

    form.populate(&product);
    form.mode = Mode::Editing(product.id.clone());
    assert_eq!(form.sku, "A1");
    assert_eq!(form.name, "Widget");
    assert_eq!(form.price, "9.5");
    assert_eq!(form.stock, "3");
    assert_eq!(form.category, "tools");
    assert_eq!(form.mode, Mode::Editing("64f1c2a9d3e8b90012ab34cd".to_string()));

    // A second edit started before the first submits takes over the form.
    let other = sample_products().remove(1);
    form.populate(&other);
    form.mode = Mode::Editing(other.id.clone());
    assert_eq!(form.mode, Mode::Editing("64f1c2a9d3e8b90012ab34ce".to_string()));

    // After the one update completes the form reverts to create mode.
    form.reset();
    assert_eq!(form.mode, Mode::Create);
    assert!(form.is_empty());
}

#[test]
fn backend_failure_surfaces_exact_message() {
    let err = crate::api::backend_error(400, br#"{"message":"SKU exists"}"#);
    match &err {
        RequestError::Backend { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "SKU exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "SKU exists");
}

#[test]
fn failed_submit_leaves_the_form_populated() {
    // Coercion fails before any request; the flow aborts with the fields
    // exactly as entered.
    let mut form = ProductForm {
        sku: "A1".to_string(),
        price: "nine".to_string(),
        stock: "3".to_string(),
        ..Default::default()
    };
    assert!(form.submit().is_err());
    assert_eq!(form.sku, "A1");
    assert_eq!(form.price, "nine");
    assert!(!form.is_empty());
    form.reset();
    assert!(form.is_empty());
}

#[test]
fn order_rows_render_populated_references() {
    let payload = br#"{"data":[{
        "_id":"64f1c2a9d3e8b90012ab34ff",
        "supplierId":{"_id":"s1","name":"Acme Supply"},
        "items":[
            {"productId":{"_id":"p1","name":"Widget"},"quantity":2},
            {"productId":{"_id":"p2","name":"Gadget"},"quantity":1}
        ],
        "status":"pending",
        "totalAmount":139,
        "notes":"rush"
    }]}"#;
    let orders: Vec<Order> = crate::api::decode_data(payload).unwrap();
    let rows = view::order_rows(&orders, "₱");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "ab34ff");
    assert_eq!(rows[0][1], "Acme Supply");
    assert_eq!(rows[0][2], "Widget x2, Gadget x1");
    assert_eq!(rows[0][3], "pending");
    assert_eq!(rows[0][4], "₱139");

    let mut table = ListView::new("orders", ORDER_HEADERS);
    let generation = table.begin_load();
    table.apply(generation, rows);
    assert_eq!(table.row_count(), 1);
}

#[test]
fn supplier_rows_blank_missing_email() {
    let payload = br#"{"data":[
        {"_id":"s1","name":"Acme Supply","contact":"Jo","email":"jo@acme.test"},
        {"_id":"s2","name":"NoMail Co","contact":"Sam"}
    ]}"#;
    let suppliers: Vec<Supplier> = crate::api::decode_data(payload).unwrap();
    let rows = view::supplier_rows(&suppliers);
    assert_eq!(rows[0][3], "jo@acme.test");
    assert_eq!(rows[1][3], "");
}

#[test]
fn create_order_body_sends_ids_not_populated_refs() {
    let draft = NewOrder {
        supplier_id: "s1".to_string(),
        items: vec![NewOrderItem {
            product_id: "p1".to_string(),
            quantity: 2,
        }],
        notes: "rush".to_string(),
    };
    let body = serde_json::to_value(&draft).unwrap();
    assert_eq!(body["supplierId"], serde_json::json!("s1"));
    assert_eq!(body["items"][0]["productId"], serde_json::json!("p1"));
    assert_eq!(body["items"][0]["quantity"], serde_json::json!(2));
    assert_eq!(body["notes"], serde_json::json!("rush"));
    assert!(body.get("status").is_none());
    assert!(body.get("totalAmount").is_none());
}

#[test]
fn session_rejects_broken_options() {
    let err = Session::new(Options {
        base_url: "   ".to_string(),
        ..Default::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, SessionError::EmptyBaseUrl));

    let err = Session::new(Options {
        base_url: "not a url".to_string(),
        ..Default::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, SessionError::InvalidBaseUrl { .. }));

    let err = Session::new(Options {
        timeout_seconds: 0,
        ..Default::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, SessionError::InvalidTimeout));
}

#[tokio::test]
async fn bootstrap_failures_are_independent_per_list() {
    // Nothing listens on port 9; each of the three loads fails on its own
    // and no table is replaced.
    let mut session = Session::new(Options {
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout_seconds: 1,
        ..Default::default()
    })
    .unwrap();
    let failures = session.bootstrap().await;
    assert_eq!(failures.len(), 3);
    assert_eq!(session.products.row_count(), 0);
    assert_eq!(session.suppliers.row_count(), 0);
    assert_eq!(session.orders.row_count(), 0);
}
