use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// A closed set of labels shared with the backend.
///
/// Every variant has exactly one wire label; `ALL` lists them in the order
/// they are offered to the user.
pub trait Enumerated: Sized + Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    /// Returns the wire/display label.
    fn as_str(self) -> &'static str;

    fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|value| value.as_str() == label)
    }
}

/// An enumerated field as read back from the backend.
///
/// Records written by other clients may carry labels this client does not
/// know; they are kept verbatim instead of failing the whole fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice<T> {
    Known(T),
    Other(String),
}

impl<T: Enumerated> Choice<T> {
    pub fn label(&self) -> &str {
        match self {
            Self::Known(value) => value.as_str(),
            Self::Other(label) => label.as_str(),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Other(_) => None,
        }
    }
}

impl<T: Enumerated> From<T> for Choice<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Utilities,
    Rent,
    Entertainment,
    Transportation,
}

impl Enumerated for Category {
    const ALL: &'static [Self] = &[
        Self::Groceries,
        Self::Utilities,
        Self::Rent,
        Self::Entertainment,
        Self::Transportation,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Utilities => "Utilities",
            Self::Rent => "Rent",
            Self::Entertainment => "Entertainment",
            Self::Transportation => "Transportation",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl Enumerated for PaymentMethod {
    const ALL: &'static [Self] = &[
        Self::CreditCard,
        Self::DebitCard,
        Self::Cash,
        Self::BankTransfer,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Cash => "Cash",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    Pending,
    Completed,
    Canceled,
}

impl Enumerated for EntryStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Completed, Self::Canceled];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }
}

/// Backend-assigned identifier.
///
/// The backend may hand out numeric or string ids; whichever form it used is
/// echoed back untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Amount as stored by the backend.
///
/// Well-formed records hold a JSON number. Numeric strings are tolerated and
/// anything else is kept as text so it can still be shown and searched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Returns the numeric value, `None` when the amount is not a finite
    /// number.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    pub fn value_or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Text used when matching a search term against the amount.
    pub fn search_text(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A financial entry as returned by `GET /financialEntries`.
///
/// Every field except `id` is optional on read: the list must still render
/// records that an older client wrote partially.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEntry {
    pub id: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Legacy headline some records carry instead of a description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Choice<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<Choice<PaymentMethod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Choice<EntryStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Fields this client does not model; preserved so a full-record `PUT`
    /// does not drop them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FinancialEntry {
    /// Builds the record the backend is expected to hold after creating
    /// `entry` under `id`.
    pub fn from_new(id: EntryId, entry: FinancialEntryNew) -> Self {
        Self {
            id,
            amount: Some(Amount::Number(entry.amount)),
            date: Some(entry.date),
            description: Some(entry.description),
            title: None,
            category: Some(entry.category.into()),
            payment_method: Some(entry.payment_method.into()),
            status: Some(entry.status.into()),
            notes: Some(entry.notes),
            extra: BTreeMap::new(),
        }
    }

    /// The searchable headline: `title` when present, otherwise the
    /// description.
    pub fn headline(&self) -> Option<&str> {
        self.title.as_deref().or(self.description.as_deref())
    }

    pub fn amount_value(&self) -> f64 {
        self.amount.as_ref().map(Amount::value_or_zero).unwrap_or(0.0)
    }

    pub fn status_kind(&self) -> Option<EntryStatus> {
        self.status.as_ref().and_then(Choice::known)
    }
}

/// Body of `POST /financialEntries`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEntryNew {
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub status: EntryStatus,
}
