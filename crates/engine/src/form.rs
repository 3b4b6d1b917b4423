//! Create/edit form input and its validation.
//!
//! The form keeps raw text exactly as typed and only turns it into a wire
//! record on submit. Validation never touches the network: a form that fails
//! [`EntryForm::validate_new`] or [`EntryForm::validate_update`] must not be
//! sent.

use api_types::{
    Amount, Category, Choice, EntryStatus, FinancialEntry, FinancialEntryNew, PaymentMethod,
};

use crate::{EngineError, Money, date::parse_date};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub amount: String,
    pub description: String,
    pub date: String,
    pub category: Option<Category>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<EntryStatus>,
    pub notes: String,
}

impl EntryForm {
    /// Prefills the form with an existing record.
    ///
    /// Labels this client does not know are left unselected so the user has
    /// to pick a valid one before saving.
    pub fn for_entry(entry: &FinancialEntry) -> Self {
        Self {
            amount: entry
                .amount
                .as_ref()
                .map(Amount::search_text)
                .unwrap_or_default(),
            description: entry.description.clone().unwrap_or_default(),
            date: entry.date.clone().unwrap_or_default(),
            category: entry.category.as_ref().and_then(Choice::known),
            payment_method: entry.payment_method.as_ref().and_then(Choice::known),
            status: entry.status_kind(),
            notes: entry.notes.clone().unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validates a create form and builds the `POST` body.
    pub fn validate_new(&self) -> Result<FinancialEntryNew, EngineError> {
        let fields = self.common_fields()?;
        let payment_method = self
            .payment_method
            .ok_or(EngineError::MissingField("payment method"))?;

        Ok(FinancialEntryNew {
            amount: fields.amount.value(),
            description: fields.description,
            date: fields.date,
            category: fields.category,
            payment_method,
            notes: self.notes.trim().to_string(),
            status: fields.status,
        })
    }

    /// Validates an edit form and merges it into `original`.
    ///
    /// The result is the full record to `PUT`: fields the form does not
    /// cover are carried over from `original` unchanged.
    pub fn validate_update(&self, original: &FinancialEntry) -> Result<FinancialEntry, EngineError> {
        let fields = self.common_fields()?;

        let mut merged = original.clone();
        merged.amount = Some(Amount::Number(fields.amount.value()));
        merged.description = Some(fields.description);
        merged.date = Some(fields.date);
        merged.category = Some(fields.category.into());
        merged.status = Some(fields.status.into());
        if let Some(method) = self.payment_method {
            merged.payment_method = Some(method.into());
        }
        let notes = self.notes.trim();
        if !notes.is_empty() || original.notes.is_some() {
            merged.notes = Some(notes.to_string());
        }

        Ok(merged)
    }

    fn common_fields(&self) -> Result<CommonFields, EngineError> {
        let amount: Money = self.amount.parse()?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be greater than zero".to_string(),
            ));
        }

        let description = required(&self.description, "description")?;
        let date = required(&self.date, "date")?;
        parse_date(&date)?;
        let category = self.category.ok_or(EngineError::MissingField("category"))?;
        let status = self.status.ok_or(EngineError::MissingField("status"))?;

        Ok(CommonFields {
            amount,
            description,
            date,
            category,
            status,
        })
    }
}

struct CommonFields {
    amount: Money,
    description: String,
    date: String,
    category: Category,
    status: EntryStatus,
}

fn required(value: &str, field: &'static str) -> Result<String, EngineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filled() -> EntryForm {
        EntryForm {
            amount: "42.10".to_string(),
            description: "Groceries run".to_string(),
            date: "2024-04-20".to_string(),
            category: Some(Category::Groceries),
            payment_method: Some(PaymentMethod::DebitCard),
            status: Some(EntryStatus::Completed),
            notes: "  ".to_string(),
        }
    }

    #[test]
    fn valid_create_form_builds_body() {
        let body = filled().validate_new().unwrap();
        assert_eq!(body.amount, 42.10);
        assert_eq!(body.payment_method, PaymentMethod::DebitCard);
        assert_eq!(body.notes, "");
    }

    #[test]
    fn negative_and_zero_amounts_are_rejected() {
        for amount in ["-5", "0", "0.00"] {
            let form = EntryForm {
                amount: amount.to_string(),
                ..filled()
            };
            assert!(matches!(
                form.validate_new(),
                Err(EngineError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let form = EntryForm {
            amount: "twelve".to_string(),
            ..filled()
        };
        assert!(matches!(
            form.validate_new(),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn create_requires_payment_method() {
        let form = EntryForm {
            payment_method: None,
            ..filled()
        };
        assert_eq!(
            form.validate_new(),
            Err(EngineError::MissingField("payment method"))
        );
    }

    #[test]
    fn blank_text_fields_are_missing() {
        let form = EntryForm {
            description: "   ".to_string(),
            ..filled()
        };
        assert_eq!(
            form.validate_new(),
            Err(EngineError::MissingField("description"))
        );

        let form = EntryForm {
            status: None,
            ..filled()
        };
        assert_eq!(form.validate_new(), Err(EngineError::MissingField("status")));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let form = EntryForm {
            date: "20/04/2024".to_string(),
            ..filled()
        };
        assert!(matches!(
            form.validate_new(),
            Err(EngineError::InvalidDate(_))
        ));
    }

    #[test]
    fn update_merges_into_original_record() {
        let original: FinancialEntry = serde_json::from_value(json!({
            "id": "x9",
            "amount": 10,
            "date": "2024-01-01",
            "description": "Old",
            "category": "Rent",
            "paymentMethod": "Cash",
            "status": "Pending",
            "imageUrl": "receipt.png"
        }))
        .unwrap();

        let mut form = EntryForm::for_entry(&original);
        assert_eq!(form.amount, "10");
        form.amount = "15.5".to_string();
        form.description = "New".to_string();

        let merged = form.validate_update(&original).unwrap();
        assert_eq!(merged.id, original.id);
        assert_eq!(merged.amount_value(), 15.5);
        assert_eq!(merged.description.as_deref(), Some("New"));
        assert_eq!(merged.payment_method, original.payment_method);
        assert_eq!(merged.notes, None);
        assert_eq!(merged.extra, original.extra);
    }

    #[test]
    fn update_does_not_require_payment_method() {
        let original: FinancialEntry = serde_json::from_value(json!({ "id": 1 })).unwrap();
        let form = EntryForm {
            payment_method: None,
            ..filled()
        };
        let merged = form.validate_update(&original).unwrap();
        assert_eq!(merged.payment_method, None);
    }

    #[test]
    fn unknown_labels_are_not_preselected() {
        let original: FinancialEntry =
            serde_json::from_value(json!({ "id": 1, "category": "Cash" })).unwrap();
        let form = EntryForm::for_entry(&original);
        assert_eq!(form.category, None);
    }
}
