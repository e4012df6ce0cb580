use rachunek::core::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), InvoiceError> {
    // RUST_LOG=rachunek=debug shows every aggregation step
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut invoice = Invoice::new();
    invoice.add_product(Product::tax_free("Owoce", dec!(200))?)?;
    invoice.add_product(Product::dairy("Maslanka", dec!(100))?)?;
    invoice.add_product_quantity(Product::other("Wino", dec!(10))?, 2)?;
    invoice.add_product(Product::alcohol("Piwo", dec!(4.99))?)?;
    invoice.add_product_quantity(Product::liquid_fuel("Benzyna", dec!(6.20))?, 40)?;
    // Equal to the first "Wino", so it lands on the same entry.
    invoice.add_product(Product::other("Wino", dec!(10))?)?;

    println!("{invoice}");
    println!("---");
    for line in invoice.lines() {
        let category = line.product.category().map_or("custom", |c| c.code());
        println!(
            "  {:<10} {:>3} x {:>6} [{}] = {}",
            line.product.name(),
            line.quantity,
            line.product.price_with_tax(),
            category,
            line.totals.gross_total
        );
    }
    println!("---");
    let totals = invoice.totals();
    println!("Net:     {}", totals.net_total);
    println!("Tax:     {}", totals.tax_total);
    println!("Gross:   {}", totals.gross_total);

    if let Err(err) = invoice.add_product_quantity(Product::tax_free("Tablet", dec!(1678))?, 0) {
        println!("Rejected: {err}");
    }
    Ok(())
}
