// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

/// Maior preço que cabe em `NUMERIC(12,2)`: 9.999.999.999,99
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

// ---
// Validação Customizada
// ---

// Usado com `#[validate(custom(function = "not_blank", message = "..."))]`.
// Espaços em branco não contam como valor.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Cor hexadecimal `#rgb` ou `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        })
}

/// Chave i18n do problema com o preço, se houver.
///
/// O banco guarda `NUMERIC(12,2)`: mais de duas casas seriam arredondadas em
/// silêncio e valores acima de `max_price` estourariam a coluna.
pub fn price_problem(price: Decimal) -> Option<&'static str> {
    if price <= Decimal::ZERO {
        Some("validation.price_positive")
    } else if price.normalize().scale() > 2 {
        Some("validation.price_scale")
    } else if price > max_price() {
        Some("validation.price_too_large")
    } else {
        None
    }
}
