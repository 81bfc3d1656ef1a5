use std::time::Duration;

use thiserror::Error;

use crate::api::{ApiClient, RequestError, DEFAULT_BASE_URL};
use crate::form::{FormError, Mode, OrderForm, ProductForm, SupplierForm};
use crate::view::{self, ListView, ORDER_HEADERS, PRODUCT_HEADERS, SUPPLIER_HEADERS};

#[derive(Clone, Debug)]
pub struct Options {
    pub base_url: String,
    pub timeout_seconds: usize,
    pub currency: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
            currency: "₱".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("base URL is empty")]
    EmptyBaseUrl,

    #[error("invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("invalid timeout, expected positive integer")]
    InvalidTimeout,

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// The request/render/mutate core. One session owns the transport client,
/// the three list views, and the three forms; every flow is a sequential
/// chain of awaits (mutate, then reset, then reload) so a failure aborts the
/// steps chained after it. Nothing is cached: each load discards and
/// rebuilds the whole table from the backend's answer.
pub struct Session {
    api: ApiClient,
    currency: String,
    pub products: ListView,
    pub suppliers: ListView,
    pub orders: ListView,
    pub product_form: ProductForm,
    pub supplier_form: SupplierForm,
    pub order_form: OrderForm,
}

impl Session {
    pub fn new(options: Options) -> Result<Self, SessionError> {
        if options.base_url.trim().is_empty() {
            return Err(SessionError::EmptyBaseUrl);
        }
        if reqwest::Url::parse(&options.base_url).is_err() {
            return Err(SessionError::InvalidBaseUrl {
                url: options.base_url.clone(),
            });
        }
        if options.timeout_seconds == 0 {
            return Err(SessionError::InvalidTimeout);
        }
        let api = ApiClient::new(
            &options.base_url,
            Duration::from_secs(options.timeout_seconds as u64),
        )?;
        Ok(Self {
            api,
            currency: options.currency,
            products: ListView::new("products", PRODUCT_HEADERS),
            suppliers: ListView::new("suppliers", SUPPLIER_HEADERS),
            orders: ListView::new("orders", ORDER_HEADERS),
            product_form: ProductForm::default(),
            supplier_form: SupplierForm::default(),
            order_form: OrderForm::default(),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Initial page load: the three list fetches run concurrently and
    /// unordered; each failure is independent of the others. Successful
    /// responses are applied, failures are returned for the caller to
    /// present.
    pub async fn bootstrap(&mut self) -> Vec<SessionError> {
        let gen_products = self.products.begin_load();
        let gen_suppliers = self.suppliers.begin_load();
        let gen_orders = self.orders.begin_load();

        let (products, suppliers, orders) = futures::join!(
            self.api.list_products(),
            self.api.list_suppliers(),
            self.api.list_orders()
        );

        let mut failures = Vec::new();
        match products {
            Ok(records) => {
                self.products
                    .apply(gen_products, view::product_rows(&records, &self.currency));
            }
            Err(e) => failures.push(SessionError::Request(e)),
        }
        match suppliers {
            Ok(records) => {
                self.suppliers
                    .apply(gen_suppliers, view::supplier_rows(&records));
            }
            Err(e) => failures.push(SessionError::Request(e)),
        }
        match orders {
            Ok(records) => {
                self.orders
                    .apply(gen_orders, view::order_rows(&records, &self.currency));
            }
            Err(e) => failures.push(SessionError::Request(e)),
        }
        failures
    }

    pub async fn load_products(&mut self) -> Result<(), SessionError> {
        let generation = self.products.begin_load();
        let records = self.api.list_products().await?;
        self.products
            .apply(generation, view::product_rows(&records, &self.currency));
        Ok(())
    }

    pub async fn load_suppliers(&mut self) -> Result<(), SessionError> {
        let generation = self.suppliers.begin_load();
        let records = self.api.list_suppliers().await?;
        self.suppliers
            .apply(generation, view::supplier_rows(&records));
        Ok(())
    }

    pub async fn load_orders(&mut self) -> Result<(), SessionError> {
        let generation = self.orders.begin_load();
        let records = self.api.list_orders().await?;
        self.orders
            .apply(generation, view::order_rows(&records, &self.currency));
        Ok(())
    }

    /// One submit path for the product form, branching on its mode: create
    /// posts a new product, editing puts the captured id. Reset and reload
    /// only happen after the request succeeded, and a successful edit
    /// reverts the form to create mode.
    pub async fn submit_product_form(&mut self) -> Result<(), SessionError> {
        let draft = self.product_form.submit()?;
        match self.product_form.mode.clone() {
            Mode::Create => {
                self.api.create_product(&draft).await?;
            }
            Mode::Editing(id) => {
                self.api.update_product(&id, &draft).await?;
            }
        }
        self.product_form.reset();
        self.load_products().await?;
        Ok(())
    }

    /// Enter edit mode for one product: fetch it, fill the form with its
    /// current values, capture its id in the mode. A second edit started
    /// before the first submits simply takes over the form.
    pub async fn start_edit(&mut self, id: &str) -> Result<(), SessionError> {
        let product = self.api.get_product(id).await?;
        self.product_form.populate(&product);
        self.product_form.mode = Mode::Editing(product.id);
        Ok(())
    }

    pub async fn submit_supplier_form(&mut self) -> Result<(), SessionError> {
        let draft = self.supplier_form.submit()?;
        self.api.create_supplier(&draft).await?;
        self.supplier_form.reset();
        self.load_suppliers().await?;
        Ok(())
    }

    pub async fn submit_order_form(&mut self) -> Result<(), SessionError> {
        let draft = self.order_form.submit()?;
        self.api.create_order(&draft).await?;
        self.order_form.reset();
        self.load_orders().await?;
        Ok(())
    }

    // Deletes assume the caller already asked the user; a declined
    // confirmation never reaches the session.

    pub async fn delete_product(&mut self, id: &str) -> Result<(), SessionError> {
        self.api.delete_product(id).await?;
        self.load_products().await?;
        Ok(())
    }

    pub async fn delete_supplier(&mut self, id: &str) -> Result<(), SessionError> {
        self.api.delete_supplier(id).await?;
        self.load_suppliers().await?;
        Ok(())
    }

    pub async fn delete_order(&mut self, id: &str) -> Result<(), SessionError> {
        self.api.delete_order(id).await?;
        self.load_orders().await?;
        Ok(())
    }
}
