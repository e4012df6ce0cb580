use rust_decimal::Decimal;

/// `a * b` without rounding.
///
/// `None` when the result overflows or would need more than 28 fractional
/// digits; `rust_decimal` silently rounds in the latter case, visible as a
/// result scale below `a.scale() + b.scale()`.
pub(crate) fn exact_mul(a: Decimal, b: Decimal) -> Option<Decimal> {
    let product = a.checked_mul(b)?;
    if a.is_zero() || b.is_zero() || product.scale() == a.scale() + b.scale() {
        Some(product)
    } else {
        None
    }
}

/// `a + b` without rounding. Same contract as [`exact_mul`].
pub(crate) fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    if a.is_zero() || b.is_zero() || sum.scale() == a.scale().max(b.scale()) {
        Some(sum)
    } else {
        None
    }
}
