use thiserror::Error;

use crate::model::{NewOrder, NewOrderItem, NewProduct, NewSupplier, Product};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("invalid {field} '{value}': expected a number")]
    NotANumber { field: String, value: String },
}

fn coerce_float(field: &str, value: &str) -> Result<f64, FormError> {
    value.trim().parse().map_err(|_| FormError::NotANumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn coerce_int(field: &str, value: &str) -> Result<i64, FormError> {
    value.trim().parse().map_err(|_| FormError::NotANumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Submission mode of the product form. The form starts in `Create`;
/// starting an edit moves it to `Editing(id)` until that one update
/// completes. Starting a second edit overwrites the first (last writer
/// wins) — there is no cancel short of starting over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Create,
    Editing(String),
}

/// The product form: named string fields the way a form holds them, coerced
/// into a typed draft on submit. Coercion failure surfaces before any
/// request is made.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductForm {
    pub sku: String,
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub description: String,
    pub mode: Mode,
}

impl ProductForm {
    /// Clear every field and revert to create mode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.sku.is_empty()
            && self.name.is_empty()
            && self.price.is_empty()
            && self.stock.is_empty()
            && self.category.is_empty()
            && self.description.is_empty()
    }

    /// Fill the fields with a product's current values (edit flow).
    pub fn populate(&mut self, product: &Product) {
        self.sku = product.sku.clone();
        self.name = product.name.clone();
        self.price = product.price.to_string();
        self.stock = product.stock.to_string();
        self.category = product.category.clone();
        self.description = product.description.clone();
    }

    pub fn submit(&self) -> Result<NewProduct, FormError> {
        Ok(NewProduct {
            sku: self.sku.clone(),
            name: self.name.clone(),
            price: coerce_float("price", &self.price)?,
            stock: coerce_int("stock", &self.stock)?,
            category: self.category.clone(),
            description: self.description.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SupplierForm {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl SupplierForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&self) -> Result<NewSupplier, FormError> {
        Ok(NewSupplier {
            name: self.name.clone(),
            contact: self.contact.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderItemField {
    pub product_id: String,
    pub quantity: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderForm {
    pub supplier_id: String,
    pub items: Vec<OrderItemField>,
    pub notes: String,
}

impl OrderForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&self) -> Result<NewOrder, FormError> {
        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items.iter() {
            items.push(NewOrderItem {
                product_id: item.product_id.clone(),
                quantity: coerce_int("quantity", &item.quantity)?,
            });
        }
        Ok(NewOrder {
            supplier_id: self.supplier_id.clone(),
            items,
            notes: self.notes.clone(),
        })
    }
}
