//! # Entity Declarations
//!
//! Field tables for the domain types in `orderdesk-core`.
//!
//! ```text
//! ┌──────────┬────────────┬─────────────┬────────────────────────────────────┐
//! │ Type     │ Table      │ Identity    │ Columns (declaration order)        │
//! ├──────────┼────────────┼─────────────┼────────────────────────────────────┤
//! │ Client   │ Client     │ idClient    │ idClient name address email age    │
//! │ Product  │ Product    │ idProduct   │ idProduct name quantity price      │
//! │ Order    │ Orders     │ idorder     │ idorder idclient idproduct         │
//! │          │            │             │ quantity totalprice                │
//! └──────────┴────────────┴─────────────┴────────────────────────────────────┘
//! ```
//!
//! `Product.stock` is stored in the `quantity` column.

use orderdesk_core::{Client, Order, Product};

use super::descriptor::{Entity, FieldSpec};

impl Entity for Client {
    const TYPE_NAME: &'static str = "Client";
    const ID_COLUMN: &'static str = "idClient";

    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<Client>;
        vec![
            F::int("idClient", |c| c.id, |c, v| c.id = v),
            F::text("name", |c| c.name.as_str(), |c, v| c.name = v),
            F::text("address", |c| c.address.as_str(), |c, v| c.address = v),
            F::text("email", |c| c.email.as_str(), |c, v| c.email = v),
            F::int("age", |c| c.age, |c, v| c.age = v),
        ]
    }
}

impl Entity for Product {
    const TYPE_NAME: &'static str = "Product";
    const ID_COLUMN: &'static str = "idProduct";

    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<Product>;
        vec![
            F::int("idProduct", |p| p.id, |p, v| p.id = v),
            F::text("name", |p| p.name.as_str(), |p, v| p.name = v),
            F::int("quantity", |p| p.stock, |p, v| p.stock = v),
            F::double("price", |p| p.price, |p, v| p.price = v),
        ]
    }
}

impl Entity for Order {
    const TYPE_NAME: &'static str = "Order";
    // ORDER is a keyword
    const TABLE: &'static str = "Orders";
    const ID_COLUMN: &'static str = "idorder";

    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<Order>;
        vec![
            F::int("idorder", |o| o.id, |o, v| o.id = v),
            F::int("idclient", |o| o.client_id, |o, v| o.client_id = v),
            F::int("idproduct", |o| o.product_id, |o, v| o.product_id = v),
            F::int("quantity", |o| o.quantity, |o, v| o.quantity = v),
            F::double("totalprice", |o| o.total_price, |o, v| o.total_price = v),
        ]
    }
}
