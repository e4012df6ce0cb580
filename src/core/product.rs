use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::arithmetic::{exact_add, exact_mul};
use super::error::InvoiceError;

/// Retail product category with a fixed tax/excise policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// General merchandise — 23% tax, no excise.
    Other,
    /// Dairy — reduced 8% tax, no excise.
    Dairy,
    /// Tax-free goods — 0% tax, no excise.
    TaxFree,
    /// Alcohol — 23% tax plus 5.56 excise per unit.
    Alcohol,
    /// Liquid fuel — tax-free base plus 5.56 excise per unit.
    LiquidFuel,
}

impl ProductCategory {
    /// Every category, in declaration order.
    pub const ALL: [ProductCategory; 5] = [
        Self::Other,
        Self::Dairy,
        Self::TaxFree,
        Self::Alcohol,
        Self::LiquidFuel,
    ];

    /// Tax as a decimal fraction (0.23 = 23%).
    pub fn tax_percent(&self) -> Decimal {
        match self {
            Self::Other | Self::Alcohol => dec!(0.23),
            Self::Dairy => dec!(0.08),
            Self::TaxFree | Self::LiquidFuel => Decimal::ZERO,
        }
    }

    /// Fixed per-unit surcharge added after tax.
    pub fn excise(&self) -> Decimal {
        match self {
            Self::Alcohol | Self::LiquidFuel => dec!(5.56),
            Self::Other | Self::Dairy | Self::TaxFree => Decimal::ZERO,
        }
    }

    /// Stable short code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Dairy => "dairy",
            Self::TaxFree => "tax-free",
            Self::Alcohol => "alcohol",
            Self::LiquidFuel => "liquid-fuel",
        }
    }

    /// Parse from the short code returned by [`code`](Self::code).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

/// An immutable product with a name, net unit price and tax/excise policy.
///
/// Equality and hashing are structural over all four attributes, so two
/// independently constructed products with identical fields are the same
/// key inside an [`Invoice`](super::Invoice). Decimals compare by value and
/// scale: a price of `100` is not equal to a price of `100.0`.
///
/// The per-unit tax and price with tax are computed once at construction and
/// must be exactly representable, so the accessors never round or overflow.
///
/// ```
/// use rachunek::core::*;
/// use rust_decimal_macros::dec;
///
/// let kefir = Product::dairy("Kefir", dec!(100)).unwrap();
/// assert_eq!(kefir.price_with_tax(), dec!(108));
/// assert_eq!(kefir, Product::dairy("Kefir", dec!(100)).unwrap());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    name: String,
    price: Decimal,
    tax_percent: Decimal,
    excise: Decimal,
    #[serde(skip_serializing)]
    tax_amount: Decimal,
    #[serde(skip_serializing)]
    price_with_tax: Decimal,
}

impl Product {
    /// Create a product with the fixed policy of `category`.
    pub fn new(
        category: ProductCategory,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, InvoiceError> {
        Self::with_policy(name, price, category.tax_percent(), category.excise())
    }

    /// Create a product with an explicit tax/excise policy.
    ///
    /// Every argument is checked before the product exists: the name must be
    /// non-empty, the three amounts non-negative, and
    /// `price + price * tax_percent + excise` exactly representable.
    pub fn with_policy(
        name: impl Into<String>,
        price: Decimal,
        tax_percent: Decimal,
        excise: Decimal,
    ) -> Result<Self, InvoiceError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvoiceError::invalid("name", "must not be empty"));
        }
        for (field, value) in [
            ("price", price),
            ("tax_percent", tax_percent),
            ("excise", excise),
        ] {
            if value < Decimal::ZERO {
                return Err(InvoiceError::invalid(
                    field,
                    format!("must not be negative, got {value}"),
                ));
            }
        }
        let tax_amount = exact_mul(price, tax_percent)
            .and_then(|tax| exact_add(tax, excise))
            .ok_or_else(|| {
                InvoiceError::invalid(
                    "price",
                    format!(
                        "tax on {price} at {tax_percent} plus {excise} is not exactly representable"
                    ),
                )
            })?;
        let price_with_tax = exact_add(price, tax_amount).ok_or_else(|| {
            InvoiceError::invalid(
                "price",
                format!("{price} plus {tax_amount} is not exactly representable"),
            )
        })?;
        Ok(Self {
            name,
            price,
            tax_percent,
            excise,
            tax_amount,
            price_with_tax,
        })
    }

    /// Decimals keyed by mantissa and scale, so `1.0` and `1.00` differ.
    fn key(&self) -> (&str, [(i128, u32); 3]) {
        (
            &self.name,
            [self.price, self.tax_percent, self.excise].map(|d| (d.mantissa(), d.scale())),
        )
    }

    /// General merchandise: 23% tax, no excise.
    pub fn other(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::Other, name, price)
    }

    /// Dairy: 8% tax, no excise.
    pub fn dairy(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::Dairy, name, price)
    }

    /// Tax-free goods: no tax, no excise.
    pub fn tax_free(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::TaxFree, name, price)
    }

    /// Alcohol: 23% tax plus 5.56 excise.
    pub fn alcohol(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::Alcohol, name, price)
    }

    /// Liquid fuel: tax-free base plus 5.56 excise.
    pub fn liquid_fuel(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::LiquidFuel, name, price)
    }

    /// Product name, as rendered on the invoice.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Net unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Tax as a decimal fraction (0.23 = 23%).
    pub fn tax_percent(&self) -> Decimal {
        self.tax_percent
    }

    /// Per-unit excise added after tax.
    pub fn excise(&self) -> Decimal {
        self.excise
    }

    /// Unit price including tax and excise: `price + price * tax_percent + excise`.
    pub fn price_with_tax(&self) -> Decimal {
        self.price_with_tax
    }

    /// Tax plus excise charged per unit.
    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    /// The category whose fixed policy matches this product, if any.
    pub fn category(&self) -> Option<ProductCategory> {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.tax_percent() == self.tax_percent && c.excise() == self.excise)
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Product {}

impl std::hash::Hash for Product {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Unvalidated wire form; deserialization goes through [`Product::with_policy`].
#[derive(Deserialize)]
struct ProductRecord {
    name: String,
    price: Decimal,
    tax_percent: Decimal,
    #[serde(default)]
    excise: Decimal,
}

impl TryFrom<ProductRecord> for Product {
    type Error = InvoiceError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Product::with_policy(record.name, record.price, record.tax_percent, record.excise)
    }
}
