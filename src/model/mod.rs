use serde::{Deserialize, Serialize};

// Wire types for the inventory backend. Read types mirror what the backend
// sends (Mongo-style `_id`, camelCase keys, populated references); the New*
// types are the create/update bodies and omit server-owned fields.

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewSupplier {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A reference to another entity. The backend populates references on reads
/// (`{_id, name}`) but accepts plain id strings on writes.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EntityRef {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        name: String,
    },
    Id(String),
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Populated { id, .. } => id,
            EntityRef::Id(id) => id,
        }
    }

    /// Display name, falling back to the raw id when unpopulated.
    pub fn name(&self) -> &str {
        match self {
            EntityRef::Populated { name, .. } => name,
            EntityRef::Id(id) => id,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct OrderItem {
    #[serde(rename = "productId")]
    pub product: EntityRef,
    pub quantity: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "supplierId")]
    pub supplier: EntityRef,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "totalAmount", default)]
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewOrderItem {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: i64,
}

// Status and total are computed by the backend and never sent on create.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewOrder {
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    pub items: Vec<NewOrderItem>,
    pub notes: String,
}
