//! Money calculation utilities using rust_decimal for precision
//!
//! All totals are computed with `Decimal` internally, then converted back to
//! `f64` for storage and serialization, rounded half-up to two places.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::CartItem;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per product
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("{} must be a finite number, got {}", field_name, value),
        ));
    }
    Ok(())
}

/// Validate a product price before it enters the catalog or an order
pub fn validate_price(price: f64) -> AppResult<()> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("price must be non-negative, got {}", price),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("price exceeds maximum allowed ({}), got {}", MAX_PRICE, price),
        ));
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValidationFailed,
            format!("quantity must be positive, got {}", quantity),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("quantity exceeds maximum allowed ({}), got {}", MAX_QUANTITY, quantity),
        ));
    }
    Ok(())
}

/// Validate a cart line before it is frozen into an order
pub fn validate_cart_item(item: &CartItem) -> AppResult<()> {
    validate_price(item.product.price)?;
    validate_quantity(item.quantity)
}

/// Line total for one cart item: price * quantity
#[inline]
pub fn line_total(item: &CartItem) -> Decimal {
    to_decimal(item.product.price) * Decimal::from(item.quantity)
}

/// Sum of line totals over a cart or order
pub fn items_total(items: &[CartItem]) -> Decimal {
    items.iter().map(line_total).sum()
}

/// VAT portion of `amount` at `rate` (e.g. 0.15 for 15%)
#[inline]
pub fn vat_amount(amount: Decimal, rate: f64) -> Decimal {
    amount * to_decimal(rate)
}

/// `amount` with VAT added on top
#[inline]
pub fn total_with_vat(amount: Decimal, rate: f64) -> Decimal {
    amount + vat_amount(amount, rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Product;

    fn product(price: f64) -> Product {
        Product {
            id: "prod-1".to_string(),
            name: "Test".to_string(),
            name_ar: "تجربة".to_string(),
            description: String::new(),
            description_ar: String::new(),
            price,
            image: "/placeholder.svg".to_string(),
            category_id: "cat-1".to_string(),
            is_available: true,
            preparation_time: 10,
        }
    }

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_rounding_half_up() {
        let value = Decimal::new(5, 3); // 0.005
        assert_eq!(to_f64(value), 0.01);

        let value = Decimal::new(4, 3); // 0.004
        assert_eq!(to_f64(value), 0.0);
    }

    #[test]
    fn test_to_decimal_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(product(10.99), 3);
        assert_eq!(to_f64(line_total(&item)), 32.97);
    }

    #[test]
    fn test_items_total() {
        let items = vec![
            CartItem::new(product(20.0), 2),
            CartItem::new(product(15.0), 1),
        ];
        assert_eq!(to_f64(items_total(&items)), 55.0);
    }

    #[test]
    fn test_items_total_empty() {
        assert_eq!(items_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_vat_display_amounts() {
        let subtotal = items_total(&[
            CartItem::new(product(20.0), 2),
            CartItem::new(product(15.0), 1),
        ]);
        assert_eq!(to_f64(vat_amount(subtotal, 0.15)), 8.25);
        assert_eq!(to_f64(total_with_vat(subtotal, 0.15)), 63.25);
    }

    #[test]
    fn test_validate_price_rejects_negative() {
        let err = validate_price(-1.5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
    }

    #[test]
    fn test_validate_price_rejects_non_finite() {
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_price_rejects_over_maximum() {
        let err = validate_price(MAX_PRICE + 1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_validate_price_accepts_boundaries() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(MAX_PRICE).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_cart_item() {
        assert!(validate_cart_item(&CartItem::new(product(12.5), 2)).is_ok());
        assert!(validate_cart_item(&CartItem::new(product(-1.0), 2)).is_err());
        assert!(validate_cart_item(&CartItem::new(product(12.5), 0)).is_err());
    }
}
