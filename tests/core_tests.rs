use rachunek::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn invoice() -> Invoice {
    Invoice::with_sequence(&InvoiceNumberSequence::starting_at(1))
}

fn three_product_invoice() -> Invoice {
    let mut inv = invoice();
    inv.add_product(Product::tax_free("Owoce", dec!(200)).unwrap())
        .unwrap();
    inv.add_product(Product::dairy("Maslanka", dec!(100)).unwrap())
        .unwrap();
    inv.add_product(Product::other("Wino", dec!(10)).unwrap())
        .unwrap();
    inv
}

fn bulk_invoice() -> Invoice {
    let mut inv = invoice();
    // 2x kubek: 10
    inv.add_product_quantity(Product::tax_free("Kubek", dec!(5)).unwrap(), 2)
        .unwrap();
    // 3x kozi serek: 30, tax 2.40
    inv.add_product_quantity(Product::dairy("Kozi Serek", dec!(10)).unwrap(), 3)
        .unwrap();
    // 1000x pinezka: 10, tax 2.30
    inv.add_product_quantity(Product::other("Pinezka", dec!(0.01)).unwrap(), 1000)
        .unwrap();
    inv
}

// --- Product ---

#[test]
fn product_name_and_price() {
    let p = Product::other("buty", dec!(100.0)).unwrap();
    assert_eq!(p.name(), "buty");
    assert_eq!(p.price(), dec!(100));
    assert_eq!(p.tax_percent(), dec!(0.23));
    assert_eq!(p.excise(), Decimal::ZERO);
}

#[test]
fn dairy_price_with_tax() {
    let p = Product::dairy("Oscypek", dec!(100.0)).unwrap();
    assert_eq!(p.tax_percent(), dec!(0.08));
    assert_eq!(p.price_with_tax(), dec!(108));
}

#[test]
fn alcohol_price_with_tax() {
    let p = Product::alcohol("Bottle of wine", dec!(100)).unwrap();
    assert_eq!(p.excise(), dec!(5.56));
    assert_eq!(p.price_with_tax(), dec!(100) + dec!(100) * dec!(0.23) + dec!(5.56));
}

#[test]
fn liquid_fuel_is_tax_free_with_excise() {
    let p = Product::liquid_fuel("Fuel canister", dec!(100)).unwrap();
    assert_eq!(p.tax_percent(), Decimal::ZERO);
    assert_eq!(p.excise(), dec!(5.56));
    assert_eq!(p.price_with_tax(), dec!(105.56));
}

#[test]
fn tax_free_has_no_tax_or_excise() {
    let p = Product::tax_free("Ogórki", dec!(50)).unwrap();
    assert_eq!(p.tax_percent(), Decimal::ZERO);
    assert_eq!(p.excise(), Decimal::ZERO);
    assert_eq!(p.price_with_tax(), p.price());
}

// --- Invoice totals ---

#[test]
fn empty_invoice_has_zero_totals() {
    let inv = invoice();
    assert_eq!(inv.net_total(), Decimal::ZERO);
    assert_eq!(inv.tax_total(), Decimal::ZERO);
    assert_eq!(inv.gross_total(), Decimal::ZERO);
}

#[test]
fn tax_free_invoice_net_equals_gross() {
    let mut inv = invoice();
    inv.add_product(Product::tax_free("Warzywa", dec!(199.99)).unwrap())
        .unwrap();
    assert_eq!(inv.net_total(), inv.gross_total());
    assert_eq!(inv.tax_total(), Decimal::ZERO);
}

#[test]
fn many_products_totals() {
    let inv = three_product_invoice();
    assert_eq!(inv.net_total(), dec!(310));
    assert_eq!(inv.tax_total(), dec!(10.30));
    assert_eq!(inv.gross_total(), dec!(320.30));
}

#[test]
fn quantities_multiply_totals() {
    let inv = bulk_invoice();
    assert_eq!(inv.net_total(), dec!(50));
    assert_eq!(inv.tax_total(), dec!(4.70));
    assert_eq!(inv.gross_total(), dec!(54.70));
}

#[test]
fn excise_counts_towards_tax_total() {
    let mut inv = invoice();
    inv.add_product_quantity(Product::liquid_fuel("Benzyna", dec!(6)).unwrap(), 10)
        .unwrap();
    assert_eq!(inv.net_total(), dec!(60));
    assert_eq!(inv.tax_total(), dec!(55.60));
    assert_eq!(inv.gross_total(), dec!(115.60));
}

#[test]
fn totals_struct_serializes_as_strings() {
    let totals = three_product_invoice().totals();
    let json = serde_json::to_value(totals).unwrap();
    assert_eq!(json["net_total"], "310");
    assert_eq!(json["tax_total"], "10.30");
    assert_eq!(json["gross_total"], "320.30");
}

// --- Aggregation ---

#[test]
fn same_instance_added_repeatedly_accumulates() {
    let mut inv = invoice();
    let p = Product::tax_free("Owoce", dec!(100)).unwrap();
    for _ in 0..5 {
        inv.add_product(p.clone()).unwrap();
    }
    assert_eq!(inv.len(), 1);
    assert_eq!(inv.quantity_of(&p), Some(5));
}

#[test]
fn freshly_constructed_equal_products_accumulate() {
    let mut inv = invoice();
    for _ in 0..12 {
        inv.add_product(Product::tax_free("Owoce", dec!(100)).unwrap())
            .unwrap();
    }
    let key = Product::tax_free("Owoce", dec!(100)).unwrap();
    assert_eq!(inv.products().get(&key), Some(&12));
    assert_eq!(inv.len(), 1);
}

#[test]
fn different_price_creates_separate_entries() {
    let mut inv = invoice();
    let p1 = Product::other("Wino", dec!(10)).unwrap();
    let p2 = Product::other("Wino", dec!(15)).unwrap();
    inv.add_product_quantity(p1.clone(), 3).unwrap();
    inv.add_product_quantity(p2.clone(), 4).unwrap();
    assert_eq!(inv.len(), 2);
    assert_eq!(inv.quantity_of(&p1), Some(3));
    assert_eq!(inv.quantity_of(&p2), Some(4));
}

#[test]
fn different_tax_creates_separate_entries() {
    let mut inv = invoice();
    let p1 = Product::dairy("Maslanka", dec!(100)).unwrap();
    let p2 = Product::other("Maslanka", dec!(100)).unwrap();
    inv.add_product_quantity(p1.clone(), 3).unwrap();
    inv.add_product_quantity(p2.clone(), 4).unwrap();
    assert_eq!(inv.len(), 2);
    assert_eq!(inv.quantity_of(&p1), Some(3));
    assert_eq!(inv.quantity_of(&p2), Some(4));
}

#[test]
fn different_excise_creates_separate_entries() {
    let mut inv = invoice();
    let p1 = Product::alcohol("Wino", dec!(100)).unwrap();
    let p2 = Product::other("Wino", dec!(100)).unwrap();
    inv.add_product(p1.clone()).unwrap();
    inv.add_product(p2.clone()).unwrap();
    assert_eq!(inv.len(), 2);
    assert_eq!(inv.quantity_of(&p1), Some(1));
    assert_eq!(inv.quantity_of(&p2), Some(1));
}

#[test]
fn entries_keep_first_seen_order() {
    let mut inv = three_product_invoice();
    inv.add_product(Product::tax_free("Owoce", dec!(200)).unwrap())
        .unwrap();
    let names: Vec<_> = inv.iter().map(|(p, _)| p.name()).collect();
    assert_eq!(names, ["Owoce", "Maslanka", "Wino"]);
}

#[test]
fn zero_and_negative_quantity_rejected() {
    let mut inv = invoice();
    let err = inv
        .add_product_quantity(Product::tax_free("Tablet", dec!(1678)).unwrap(), 0)
        .unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidArgument(_)));
    assert!(
        inv.add_product_quantity(Product::dairy("Zsiadle mleko", dec!(5.55)).unwrap(), -1)
            .is_err()
    );
    assert!(inv.is_empty());
}

// --- Rendering ---

#[test]
fn rendering_layout() {
    let inv = three_product_invoice();
    insta::assert_snapshot!(inv.to_string(), @r"
    1
    Owoce, 1, 200
    Maslanka, 1, 100
    Wino, 1, 10
    Liczba pozycji: 3
    ");
}

#[test]
fn rendering_starts_with_number_and_ends_with_count() {
    let inv = three_product_invoice();
    let rendered = inv.to_string();
    let lines: Vec<&str> = rendered.split('\n').collect();
    assert_eq!(lines.len(), 1 + inv.len() + 1);
    assert_eq!(lines[0], inv.number().to_string());
    assert_eq!(*lines.last().unwrap(), format!("Liczba pozycji: {}", inv.len()));
    assert!(!rendered.ends_with('\n'));
}

#[test]
fn rendering_entry_lines_follow_products() {
    let inv = bulk_invoice();
    let rendered = inv.to_string();
    let entry_lines: Vec<&str> = rendered.lines().skip(1).take(inv.len()).collect();
    let expected: Vec<String> = inv
        .iter()
        .map(|(p, q)| format!("{}, {}, {}", p, q, p.price()))
        .collect();
    assert_eq!(entry_lines, expected);
    assert_eq!(entry_lines[2], "Pinezka, 1000, 0.01");
}
