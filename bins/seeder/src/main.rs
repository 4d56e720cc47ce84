//! Database seeder for Lendbook development and testing.
//!
//! Issues the demo loan (15000 over 3 years at the configured standard
//! rate), applies a 5000 lump-sum payment, and prints the resulting
//! overview and ledger. Each run issues a fresh loan.
//!
//! Usage: cargo run --bin seeder

use lendbook_core::lending::{LoanTerms, PaymentType};
use lendbook_db::{LoanRepository, connect_and_migrate};
use lendbook_shared::AppConfig;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = connect_and_migrate(&config.database).await?;
    let repo = LoanRepository::new(db);

    println!("Issuing demo loan...");
    let terms = LoanTerms::new(dec!(15000), 3, config.lending.annual_rate_percent)?;
    let issued = repo.issue_loan(terms).await?;
    println!(
        "  loan {} total {} monthly {}",
        issued.loan_id, issued.total_amount, issued.monthly_installment
    );

    println!("Recording demo payment...");
    let receipt = repo
        .record_payment(issued.loan_id, PaymentType::LumpSum, dec!(5000))
        .await?;
    println!("  amount paid {} ({:?})", receipt.amount_paid, receipt.status);

    let overview = repo.get_overview(issued.loan_id).await?;
    println!("  balance {}", overview.balance_amount);

    for payment in repo.get_ledger(issued.loan_id).await? {
        println!(
            "  {} {} at {}",
            payment.payment_type,
            payment.amount,
            payment.payment_date.to_rfc3339()
        );
    }

    println!("Seeding complete!");
    Ok(())
}
