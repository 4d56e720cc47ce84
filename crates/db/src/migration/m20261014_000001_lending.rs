//! Initial lending schema: loans and their append-only payments.
//!
//! Every statement is `IF NOT EXISTS`, so running it against an
//! already-initialized database is a no-op.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Loans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Loans::LoanId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Loans::LoanAmount).decimal().not_null())
                    .col(ColumnDef::new(Loans::LoanPeriod).integer().not_null())
                    .col(ColumnDef::new(Loans::InterestRate).decimal().not_null())
                    .col(ColumnDef::new(Loans::TotalAmount).decimal().not_null())
                    .col(
                        ColumnDef::new(Loans::AmountPaid)
                            .decimal()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Loans::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Loans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(
                        Expr::col(Loans::AmountPaid)
                            .gte(0)
                            .and(Expr::col(Loans::AmountPaid).lte(Expr::col(Loans::TotalAmount))),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::LoanId).uuid().not_null())
                    .col(ColumnDef::new(Payments::PaymentType).string().not_null())
                    .col(ColumnDef::new(Payments::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(Payments::PaymentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_loan")
                            .from(Payments::Table, Payments::LoanId)
                            .to(Loans::Table, Loans::LoanId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Ledger reads are always "payments of one loan, oldest first"
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_loan_date")
                    .table(Payments::Table)
                    .col(Payments::LoanId)
                    .col(Payments::PaymentDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Loans::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Loans {
    Table,
    LoanId,
    LoanAmount,
    LoanPeriod,
    InterestRate,
    TotalAmount,
    AmountPaid,
    Version,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    LoanId,
    PaymentType,
    Amount,
    PaymentDate,
}
