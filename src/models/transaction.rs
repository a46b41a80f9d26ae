//! Transaction model
//!
//! A single recorded income or expense event. Identity and creation time are
//! owned by the store; everything else is supplied by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, TransactionType};
use super::ids::{TransactionId, UserId};
use super::money::Money;

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Largest accepted amount: one trillion currency units
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000_000);

/// Caller-supplied fields of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub kind: TransactionType,
    pub category: Category,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        user_id: UserId,
        kind: TransactionType,
        category: Category,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            kind,
            category,
            description: String::new(),
            amount,
            date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.description)
    }
}

/// A stored transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    pub id: TransactionId,

    pub user_id: UserId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub category: Category,

    #[serde(rename = "desc", default)]
    pub description: String,

    /// Non-negative; the sign comes from `kind`
    pub amount: Money,

    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a stored record from caller fields plus store-owned identity
    pub fn from_new(id: TransactionId, input: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: input.user_id,
            kind: input.kind,
            category: input.category,
            description: input.description,
            amount: input.amount,
            date: input.date,
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with income positive and expense negative
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Copy every caller-owned field from `other`, keeping `id` and
    /// `created_at`
    pub fn apply(&mut self, other: &Transaction) {
        self.user_id = other.user_id;
        self.kind = other.kind;
        self.category = other.category;
        self.description = other.description.clone();
        self.amount = other.amount;
        self.date = other.date;
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.description)
    }
}

fn validate_fields(amount: Money, description: &str) -> Result<(), TransactionValidationError> {
    if amount.is_negative() {
        return Err(TransactionValidationError::NegativeAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(TransactionValidationError::AmountTooLarge(amount));
    }

    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(TransactionValidationError::DescriptionTooLong(len));
    }

    Ok(())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category.label(),
            self.signed_amount(),
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount is too large (got {}, max {})", amount, MAX_AMOUNT)
            }
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description is too long ({} characters, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        let input = NewTransaction::new(
            UserId::new(1),
            TransactionType::Expense,
            Category::Food,
            Money::from_cents(4000),
            NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        )
        .with_description("lunch");
        Transaction::from_new(TransactionId::new(1), input, Utc::now())
    }

    #[test]
    fn test_signed_amount() {
        let mut txn = sample();
        assert_eq!(txn.signed_amount(), Money::from_cents(-4000));
        assert!(txn.is_expense());

        txn.kind = TransactionType::Income;
        assert_eq!(txn.signed_amount(), Money::from_cents(4000));
        assert!(txn.is_income());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut original = sample();
        let mut replacement = sample();
        replacement.id = TransactionId::new(99);
        replacement.created_at = Utc::now() + chrono::Duration::days(3);
        replacement.description = "dinner".to_string();
        replacement.amount = Money::from_cents(8000);

        let created_at = original.created_at;
        original.apply(&replacement);

        assert_eq!(original.id, TransactionId::new(1));
        assert_eq!(original.created_at, created_at);
        assert_eq!(original.description, "dinner");
        assert_eq!(original.amount, Money::from_cents(8000));
    }

    #[test]
    fn test_validation() {
        let mut txn = sample();
        assert!(txn.validate().is_ok());

        txn.amount = Money::from_cents(-1);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(Money::from_cents(-1)))
        );

        txn.amount = MAX_AMOUNT;
        assert!(txn.validate().is_ok());
        txn.amount = MAX_AMOUNT + Money::from_cents(1);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::AmountTooLarge(_))
        ));

        txn.amount = Money::zero();
        txn.description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::DescriptionTooLong(_))
        ));
    }

    #[test]
    fn test_serialized_field_names() {
        let txn = sample();
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["transaction_id"], 1);
        assert_eq!(value["user_id"], 1);
        assert_eq!(value["type"], 0);
        assert_eq!(value["category"], 0);
        assert_eq!(value["desc"], "lunch");
        assert_eq!(value["amount"], 4000);
        assert_eq!(value["date"], "2024-03-12");

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", sample()), "2024-03-12 餐饮 -40.00 lunch");
    }
}
