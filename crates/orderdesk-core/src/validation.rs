//! # Validation Module
//!
//! Business rule validation for clients, products and orders.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Services (orderdesk-db::service)                             │
//! │  └── Call THIS MODULE before any write                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (stock >= 0)                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::validation::{validate_email, validate_quantity};
//!
//! validate_email("ana@x.com").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Client, Product};
use crate::{MAX_CLIENT_AGE, MAX_ORDER_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_ADDRESS_LEN: usize = 300;
const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a client name.
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a postal address.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    validate_text("address", address, MAX_ADDRESS_LEN)
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates an email address.
///
/// ## Rules
/// - Local part: letters, digits and `_ + & * -`, dot-separated, no empty
///   segments
/// - Domain: at least two dot-separated labels of letters, digits and `-`
/// - Top-level label: 2 to 7 ASCII letters
///
/// ## Example
/// ```rust
/// use orderdesk_core::validation::validate_email;
///
/// assert!(validate_email("ana@x.com").is_ok());
/// assert!(validate_email("ana.maria+shop@mail.example.org").is_ok());
/// assert!(validate_email("ana@").is_err());
/// assert!(validate_email("not an email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_text("email", email, MAX_EMAIL_LEN)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .trim()
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    let local_ok = local.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_+&*-".contains(c))
    });
    if !local_ok {
        return Err(invalid("invalid characters before '@'"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid("domain must contain a '.'"));
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !labels_ok {
        return Err(invalid("invalid domain"));
    }

    let tld = labels[labels.len() - 1];
    if !(2..=7).contains(&tld.len()) || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("invalid top-level domain"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a client age.
pub fn validate_age(age: i64) -> ValidationResult<()> {
    if !(0..=MAX_CLIENT_AGE).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min: 0,
            max: MAX_CLIENT_AGE,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (free items are allowed)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ORDER_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Runs every client rule; stops at the first failure.
pub fn validate_client(client: &Client) -> ValidationResult<()> {
    validate_client_name(&client.name)?;
    validate_address(&client.address)?;
    validate_email(&client.email)?;
    validate_age(client.age)
}

/// Runs every product rule; stops at the first failure.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_stock(product.stock)?;
    validate_price(product.price)
}

/// Checks that `quantity` units of `product` are available.
///
/// ## Returns
/// * `Ok(())` - Enough stock
/// * `Err(CoreError::InsufficientStock)` - Order must not be placed
pub fn check_stock_availability(product: &Product, quantity: i64) -> CoreResult<()> {
    if product.has_stock_for(quantity) {
        return Ok(());
    }

    Err(CoreError::InsufficientStock {
        product: product.name.clone(),
        available: product.stock,
        requested: quantity,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
