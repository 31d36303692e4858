use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Fixed textual form used for storing, displaying, and searching dates.
pub const DATE_FORMAT: &str = "%Y/%m/%d";
const MONTH_FORMAT: &str = "%Y/%m";
const DATE_TEXT_LEN: usize = 10;
/// Upper bound for a single amount; keeps ledger-wide sums finite.
pub const MAX_AMOUNT: f64 = 1e12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    #[serde(alias = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: TxnDate,
}

impl Transaction {
    /// Amount with the sign implied by the transaction kind.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn month_key(&self) -> String {
        self.date.month_key()
    }

    /// Checks the stored fields against the record rules, used for loaded data.
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_category(&self.category)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "i" => Ok(TransactionKind::Income),
            "expense" | "e" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::InvalidKind(format!(
                "`{other}` is not one of `income` or `expense`"
            ))),
        }
    }
}

/// Calendar date stored and rendered as `YYYY/MM/DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxnDate(NaiveDate);

impl TxnDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidDate("date is empty".into()));
        }
        if trimmed.len() != DATE_TEXT_LEN {
            return Err(LedgerError::InvalidDate(format!(
                "`{trimmed}` must use the YYYY/MM/DD format"
            )));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| {
                LedgerError::InvalidDate(format!("`{trimmed}` is not a valid YYYY/MM/DD date"))
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYY/MM`, the first seven characters of the stored form.
    pub fn month_key(&self) -> String {
        self.0.format(MONTH_FORMAT).to_string()
    }
}

impl fmt::Display for TxnDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for TxnDate {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for TxnDate {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TxnDate> for String {
    fn from(date: TxnDate) -> Self {
        date.to_string()
    }
}

pub fn validate_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        if amount > MAX_AMOUNT {
            return Err(LedgerError::InvalidAmount(format!(
                "{amount} exceeds the maximum of {MAX_AMOUNT}"
            )));
        }
        Ok(amount)
    } else {
        Err(LedgerError::InvalidAmount(format!(
            "{amount} must be a positive number"
        )))
    }
}

pub fn parse_amount(value: &str) -> Result<f64> {
    let trimmed = value.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(format!("`{trimmed}` is not a number")))?;
    validate_amount(amount)
}

/// Returns the trimmed category label.
pub fn validate_category(category: &str) -> Result<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidCategory(
            "category cannot be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Candidate transaction awaiting an id from the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: Option<TxnDate>,
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind, amount: f64, category: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: String::new(),
            date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: TxnDate) -> Self {
        self.date = Some(date);
        self
    }

    pub(crate) fn into_transaction(self, id: u32) -> Result<Transaction> {
        let amount = validate_amount(self.amount)?;
        let category = validate_category(&self.category)?;
        Ok(Transaction {
            id,
            kind: self.kind,
            amount,
            category,
            description: self.description.trim().to_string(),
            date: self.date.unwrap_or_else(TxnDate::today),
        })
    }
}

/// A single-field edit; the id is never editable.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionUpdate {
    Kind(TransactionKind),
    Amount(f64),
    Category(String),
    Description(String),
    Date(TxnDate),
}

impl TransactionUpdate {
    pub const FIELDS: [&'static str; 5] = ["kind", "amount", "category", "description", "date"];

    pub fn parse(field: &str, value: &str) -> Result<Self> {
        match field.trim().to_ascii_lowercase().as_str() {
            "kind" | "type" => Ok(Self::Kind(value.parse()?)),
            "amount" => Ok(Self::Amount(parse_amount(value)?)),
            "category" => Ok(Self::Category(validate_category(value)?)),
            "description" => Ok(Self::Description(value.trim().to_string())),
            "date" => Ok(Self::Date(TxnDate::parse(value)?)),
            other => Err(LedgerError::InvalidArgument(format!(
                "unknown field `{other}`; expected one of {}",
                Self::FIELDS.join(", ")
            ))),
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Kind(_) => "kind",
            Self::Amount(_) => "amount",
            Self::Category(_) => "category",
            Self::Description(_) => "description",
            Self::Date(_) => "date",
        }
    }

    pub(crate) fn apply(self, transaction: &mut Transaction) -> Result<()> {
        match self {
            Self::Kind(kind) => transaction.kind = kind,
            Self::Amount(amount) => transaction.amount = validate_amount(amount)?,
            Self::Category(category) => transaction.category = validate_category(&category)?,
            Self::Description(description) => {
                transaction.description = description.trim().to_string()
            }
            Self::Date(date) => transaction.date = date,
        }
        Ok(())
    }
}
