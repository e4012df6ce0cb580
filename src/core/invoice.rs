use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::arithmetic::{exact_add, exact_mul};
use super::error::InvoiceError;
use super::numbering::InvoiceNumberSequence;
use super::product::Product;

/// Label of the closing line of the rendered invoice ("number of line items").
pub const LINE_COUNT_LABEL: &str = "Liczba pozycji";

/// An invoice: a sequence number plus products aggregated by quantity.
///
/// Products are keyed by structural equality. Adding a product equal to one
/// already present increases that entry's quantity; anything that differs in
/// name, price, tax or excise becomes a new entry, appended in insertion order.
///
/// Line amounts and totals are kept exact: an addition whose amounts would
/// overflow or need rounding is rejected before the invoice changes, so the
/// total accessors never fail.
///
/// ```
/// use rachunek::core::*;
/// use rust_decimal_macros::dec;
///
/// let mut invoice = Invoice::with_sequence(&InvoiceNumberSequence::starting_at(7));
/// invoice.add_product(Product::tax_free("Owoce", dec!(200)).unwrap()).unwrap();
/// invoice.add_product(Product::dairy("Maslanka", dec!(100)).unwrap()).unwrap();
/// invoice.add_product(Product::other("Wino", dec!(10)).unwrap()).unwrap();
///
/// assert_eq!(invoice.net_total(), dec!(310));
/// assert_eq!(invoice.tax_total(), dec!(10.30));
/// assert_eq!(invoice.gross_total(), dec!(320.30));
/// assert!(invoice.to_string().ends_with("Liczba pozycji: 3"));
/// ```
#[derive(Debug, Clone)]
pub struct Invoice {
    number: u64,
    entries: IndexMap<Product, u64>,
    // Parallel to `entries`.
    line_totals: Vec<InvoiceTotals>,
    totals: InvoiceTotals,
}

/// Net, tax and gross amounts of an invoice or of one of its lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of unit price × quantity.
    pub net_total: Decimal,
    /// Sum of (tax + excise per unit) × quantity.
    pub tax_total: Decimal,
    /// net_total + tax_total.
    pub gross_total: Decimal,
}

impl InvoiceTotals {
    fn for_quantity(product: &Product, quantity: u64) -> Option<Self> {
        let quantity = Decimal::from(quantity);
        Some(Self {
            net_total: exact_mul(product.price(), quantity)?,
            tax_total: exact_mul(product.tax_amount(), quantity)?,
            gross_total: exact_mul(product.price_with_tax(), quantity)?,
        })
    }

    fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(Self {
            net_total: exact_add(self.net_total, other.net_total)?,
            tax_total: exact_add(self.tax_total, other.tax_total)?,
            gross_total: exact_add(self.gross_total, other.gross_total)?,
        })
    }
}

/// One aggregated entry with its amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceLine<'a> {
    /// The entry's key.
    pub product: &'a Product,
    /// Accumulated quantity, at least 1.
    pub quantity: u64,
    /// Amounts for `quantity` units of `product`.
    pub totals: InvoiceTotals,
}

impl Invoice {
    /// Create an empty invoice numbered from the process-wide sequence.
    pub fn new() -> Self {
        Self::with_sequence(InvoiceNumberSequence::global())
    }

    /// Create an empty invoice numbered from `sequence`.
    pub fn with_sequence(sequence: &InvoiceNumberSequence) -> Self {
        let number = sequence.next_number();
        tracing::debug!(number, "invoice created");
        Self {
            number,
            entries: IndexMap::new(),
            line_totals: Vec::new(),
            totals: InvoiceTotals::default(),
        }
    }

    /// Sequence number assigned at creation; never changes.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Add a single unit of `product`.
    pub fn add_product(&mut self, product: Product) -> Result<(), InvoiceError> {
        self.add_product_quantity(product, 1)
    }

    /// Add `quantity` units of `product`.
    ///
    /// Fails without touching the invoice when `quantity` is not positive,
    /// the accumulated quantity would overflow, or the resulting amounts are
    /// not exactly representable.
    pub fn add_product_quantity(
        &mut self,
        product: Product,
        quantity: i64,
    ) -> Result<(), InvoiceError> {
        if quantity <= 0 {
            tracing::debug!(
                number = self.number,
                %product,
                quantity,
                "rejected non-positive quantity"
            );
            return Err(InvoiceError::invalid(
                "quantity",
                format!("must be positive, got {quantity}"),
            ));
        }
        let quantity = quantity.unsigned_abs();

        let unrepresentable = || {
            InvoiceError::invalid(
                "quantity",
                format!("{quantity} x {product} is not exactly representable"),
            )
        };
        let added = InvoiceTotals::for_quantity(&product, quantity).ok_or_else(unrepresentable)?;
        let totals = self.totals.checked_add(&added).ok_or_else(unrepresentable)?;

        match self.entries.get_full_mut(&product) {
            Some((index, _, existing)) => {
                let total = existing.checked_add(quantity).ok_or_else(|| {
                    InvoiceError::invalid("quantity", format!("total for {product} overflows"))
                })?;
                let line = self.line_totals[index]
                    .checked_add(&added)
                    .ok_or_else(unrepresentable)?;
                tracing::debug!(
                    number = self.number,
                    %product,
                    quantity,
                    total,
                    "quantity increased"
                );
                *existing = total;
                self.line_totals[index] = line;
            }
            None => {
                tracing::debug!(number = self.number, %product, quantity, "product added");
                self.entries.insert(product, quantity);
                self.line_totals.push(added);
            }
        }
        self.totals = totals;
        Ok(())
    }

    /// Read-only view of the aggregated entries in insertion order.
    pub fn products(&self) -> &IndexMap<Product, u64> {
        &self.entries
    }

    /// Quantity held for `product`, if it is on the invoice.
    pub fn quantity_of(&self, product: &Product) -> Option<u64> {
        self.entries.get(product).copied()
    }

    /// Iterate `(product, quantity)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Product, u64)> {
        self.entries.iter().map(|(p, q)| (p, *q))
    }

    /// Iterate entries with their line amounts, in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = InvoiceLine<'_>> {
        self.entries
            .iter()
            .zip(&self.line_totals)
            .map(|((product, quantity), totals)| InvoiceLine {
                product,
                quantity: *quantity,
                totals: *totals,
            })
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True until the first product is added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of unit price × quantity over all entries.
    pub fn net_total(&self) -> Decimal {
        self.totals.net_total
    }

    /// Sum of per-unit tax plus excise × quantity over all entries.
    pub fn tax_total(&self) -> Decimal {
        self.totals.tax_total
    }

    /// Sum of unit price with tax × quantity; equals net plus tax.
    pub fn gross_total(&self) -> Decimal {
        self.totals.gross_total
    }

    /// All three totals at once.
    pub fn totals(&self) -> InvoiceTotals {
        self.totals
    }
}

impl Default for Invoice {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Invoice {
    type Item = (&'a Product, &'a u64);
    type IntoIter = indexmap::map::Iter<'a, Product, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Renders the invoice number, one `name, quantity, unit price` line per
/// entry, and the entry count, separated by `\n` with no trailing newline.
impl std::fmt::Display for Invoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.number)?;
        for (product, quantity) in self.iter() {
            writeln!(f, "{}, {}, {}", product, quantity, product.price())?;
        }
        write!(f, "{}: {}", LINE_COUNT_LABEL, self.len())
    }
}
