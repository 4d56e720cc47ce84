//! Loan repository: the only writer of loans and payments.
//!
//! Payments to one loan are serialized twice over. Inside the process a
//! per-loan async mutex queues payers, so they wait instead of conflicting.
//! Inside the database each payment transaction claims the loan row with a
//! write (bumping `version`) before reading it, which takes the row lock on
//! PostgreSQL and the write lock on SQLite. The balance check therefore
//! always sees the latest committed `amount_paid`, even across processes.
//! The new total and the payment row commit together or not at all.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use lendbook_core::lending::{
    LendingError, LoanBalance, LoanStatus, LoanTerms, MAX_PERIOD_YEARS, PaymentRecord, PaymentType,
    sort_ledger,
};
use lendbook_shared::{AppError, LoanId};

use crate::entities::{loans, payments};

/// Error types for loan operations.
#[derive(Debug, thiserror::Error)]
pub enum LoanError {
    /// Domain rule violation or lookup failure.
    #[error(transparent)]
    Lending(#[from] LendingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LoanError> for AppError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::Lending(err) => err.into(),
            LoanError::Database(err) => LendingError::Storage(err.to_string()).into(),
        }
    }
}

/// Result of issuing a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedLoan {
    /// Identifier of the new loan.
    pub loan_id: LoanId,
    /// Monthly installment, rounded to cents.
    pub monthly_installment: Decimal,
    /// Total payable over the loan's life.
    pub total_amount: Decimal,
}

/// Result of an accepted payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    /// Loan the payment was applied to.
    pub loan_id: LoanId,
    /// Running total after this payment.
    pub amount_paid: Decimal,
    /// Repayment status after this payment.
    pub status: LoanStatus,
    /// Acceptance time assigned by the ledger.
    pub payment_date: DateTime<Utc>,
}

/// Snapshot of a loan with its derived outstanding balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanOverview {
    /// Loan identifier.
    pub loan_id: LoanId,
    /// Principal.
    pub loan_amount: Decimal,
    /// Period in years.
    pub loan_period: i32,
    /// Annual rate in percent, as fixed at issuance.
    pub interest_rate: Decimal,
    /// Total payable.
    pub total_amount: Decimal,
    /// Sum of accepted payments.
    pub amount_paid: Decimal,
    /// `total_amount - amount_paid`.
    pub balance_amount: Decimal,
    /// Repayment status.
    pub status: LoanStatus,
}

impl From<loans::Model> for LoanOverview {
    fn from(loan: loans::Model) -> Self {
        let balance = LoanBalance {
            total_amount: loan.total_amount,
            amount_paid: loan.amount_paid,
        };

        Self {
            loan_id: LoanId::from_uuid(loan.loan_id),
            loan_amount: loan.loan_amount,
            loan_period: loan.loan_period,
            interest_rate: loan.interest_rate,
            total_amount: loan.total_amount,
            amount_paid: loan.amount_paid,
            balance_amount: balance.balance_amount(),
            status: balance.status(),
        }
    }
}

/// Loan repository for issuance, payments and ledger reads.
///
/// Clones share the pool and the payment queues, so one repository should
/// be built per process and cloned into handlers.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    db: DatabaseConnection,
    payment_locks: Arc<DashMap<LoanId, Arc<Mutex<()>>>>,
}

impl LoanRepository {
    /// Creates a new loan repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            payment_locks: Arc::new(DashMap::new()),
        }
    }

    /// Issues a loan under validated terms.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn issue_loan(&self, terms: LoanTerms) -> Result<IssuedLoan, LoanError> {
        let quote = terms.quote();
        let loan_id = LoanId::new();
        let loan_period =
            i32::try_from(terms.period_years).map_err(|_| LendingError::PeriodTooLong {
                max: MAX_PERIOD_YEARS,
            })?;

        let loan = loans::ActiveModel {
            loan_id: Set(loan_id.into_inner()),
            loan_amount: Set(terms.principal),
            loan_period: Set(loan_period),
            interest_rate: Set(terms.annual_rate_percent),
            total_amount: Set(quote.total_amount),
            amount_paid: Set(Decimal::ZERO),
            version: Set(0),
            created_at: Set(Utc::now().into()),
        };
        loan.insert(&self.db).await?;

        info!(
            loan_id = %loan_id,
            principal = %terms.principal,
            period_years = terms.period_years,
            total_amount = %quote.total_amount,
            "Loan issued"
        );

        Ok(IssuedLoan {
            loan_id,
            monthly_installment: quote.monthly_installment,
            total_amount: quote.total_amount,
        })
    }

    /// Records a payment against a loan.
    ///
    /// Concurrent payments to the same loan are applied one after another;
    /// each is checked against the total left by the ones before it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The loan does not exist
    /// - The amount is not positive or would overpay the loan
    /// - Database operation fails
    pub async fn record_payment(
        &self,
        loan_id: LoanId,
        payment_type: PaymentType,
        amount: Decimal,
    ) -> Result<PaymentReceipt, LoanError> {
        let lock = self.payment_lock(loan_id);
        let result = {
            let _queued = lock.lock().await;
            self.apply_payment(loan_id, &payment_type, amount).await
        };
        drop(lock);
        self.payment_locks
            .remove_if(&loan_id, |_, queue| Arc::strong_count(queue) == 1);

        let receipt = result?;
        info!(
            loan_id = %loan_id,
            payment_type = %payment_type,
            amount = %amount,
            amount_paid = %receipt.amount_paid,
            "Payment recorded"
        );
        Ok(receipt)
    }

    /// Returns the queue for payments to one loan, creating it on first use.
    fn payment_lock(&self, loan_id: LoanId) -> Arc<Mutex<()>> {
        Arc::clone(self.payment_locks.entry(loan_id).or_default().value())
    }

    /// Claims the loan row, validates the payment against the claimed
    /// balance, then writes the new total and the payment row.
    ///
    /// Rejections roll back explicitly; a database error drops the
    /// transaction, which also rolls it back.
    async fn apply_payment(
        &self,
        loan_id: LoanId,
        payment_type: &PaymentType,
        amount: Decimal,
    ) -> Result<PaymentReceipt, LoanError> {
        let txn = self.db.begin().await?;

        let Some(loan) = Self::claim_loan(&txn, loan_id).await? else {
            txn.rollback().await?;
            return Err(LendingError::LoanNotFound(loan_id.to_string()).into());
        };

        let balance = LoanBalance {
            total_amount: loan.total_amount,
            amount_paid: loan.amount_paid,
        };
        let amount_paid = match balance.apply_payment(amount) {
            Ok(amount_paid) => amount_paid,
            Err(err) => {
                txn.rollback().await?;
                return Err(err.into());
            }
        };

        loans::Entity::update_many()
            .col_expr(loans::Column::AmountPaid, Expr::value(amount_paid))
            .filter(loans::Column::LoanId.eq(loan.loan_id))
            .exec(&txn)
            .await?;

        let payment_date = Utc::now();
        payments::ActiveModel {
            id: NotSet,
            loan_id: Set(loan.loan_id),
            payment_type: Set(payment_type.to_string()),
            amount: Set(amount),
            payment_date: Set(payment_date.into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        let status = LoanBalance {
            amount_paid,
            ..balance
        }
        .status();

        Ok(PaymentReceipt {
            loan_id,
            amount_paid,
            status,
            payment_date,
        })
    }

    /// Bumps the loan's version and reads the row back inside `txn`.
    ///
    /// The write comes first so the lock is held before the balance is read.
    /// Returns `None` if the loan does not exist.
    async fn claim_loan(
        txn: &DatabaseTransaction,
        loan_id: LoanId,
    ) -> Result<Option<loans::Model>, DbErr> {
        let claimed = loans::Entity::update_many()
            .col_expr(loans::Column::Version, Expr::col(loans::Column::Version).add(1))
            .filter(loans::Column::LoanId.eq(loan_id.into_inner()))
            .exec(txn)
            .await?;

        if claimed.rows_affected == 0 {
            debug!(loan_id = %loan_id, "Payment for unknown loan");
            return Ok(None);
        }

        loans::Entity::find_by_id(loan_id.into_inner())
            .one(txn)
            .await
    }

    /// Returns a loan's payments, oldest first.
    ///
    /// An unknown loan yields an empty ledger rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_ledger(&self, loan_id: LoanId) -> Result<Vec<PaymentRecord>, LoanError> {
        let rows = payments::Entity::find()
            .filter(payments::Column::LoanId.eq(loan_id.into_inner()))
            .order_by_asc(payments::Column::PaymentDate)
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await?;

        let mut ledger: Vec<PaymentRecord> = rows
            .into_iter()
            .map(|row| PaymentRecord {
                payment_type: PaymentType::from(row.payment_type),
                amount: row.amount,
                payment_date: row.payment_date.with_timezone(&Utc),
            })
            .collect();

        // Text-encoded timestamps (SQLite) do not always sort chronologically
        sort_ledger(&mut ledger);

        Ok(ledger)
    }

    /// Returns the loan with its outstanding balance.
    ///
    /// # Errors
    ///
    /// Returns `LoanNotFound` if the loan does not exist, or an error if the
    /// database query fails.
    pub async fn get_overview(&self, loan_id: LoanId) -> Result<LoanOverview, LoanError> {
        let loan = self
            .find_loan(loan_id)
            .await?
            .ok_or_else(|| LendingError::LoanNotFound(loan_id.to_string()))?;

        Ok(loan.into())
    }

    /// Finds a loan by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_loan(&self, loan_id: LoanId) -> Result<Option<loans::Model>, DbErr> {
        loans::Entity::find_by_id(loan_id.into_inner())
            .one(&self.db)
            .await
    }
}
