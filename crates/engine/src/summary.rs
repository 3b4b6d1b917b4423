//! Spending totals feeding the category chart.

use api_types::{Category, Choice, FinancialEntry};

use crate::Money;

/// Label of the slice collecting entries without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: Option<Choice<Category>>,
    pub total: Money,
}

impl CategoryTotal {
    pub fn label(&self) -> &str {
        self.category
            .as_ref()
            .map(Choice::label)
            .unwrap_or(UNCATEGORIZED)
    }
}

/// Grand total plus one total per category.
///
/// Categories keep the order in which they first appear in the input.
/// Amounts that are not numbers count as zero, so the category totals always
/// add up to the grand total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub total: Money,
    pub categories: Vec<CategoryTotal>,
}

impl Summary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a FinancialEntry>,
    {
        let mut summary = Self::default();

        for entry in entries {
            let amount = Money::new(entry.amount_value());
            summary.total = summary.total + amount;

            // A handful of categories at most, a linear scan keeps first-seen order.
            match summary
                .categories
                .iter_mut()
                .find(|slice| slice.category == entry.category)
            {
                Some(slice) => slice.total = slice.total + amount,
                None => summary.categories.push(CategoryTotal {
                    category: entry.category.clone(),
                    total: amount,
                }),
            }
        }

        summary
    }

    /// Grand total with two decimals, e.g. `100.00`.
    pub fn total_display(&self) -> String {
        self.total.fixed()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(CategoryTotal::label).collect()
    }

    /// Fraction of the grand total held by `slice`, in `0.0..=1.0`.
    pub fn share(&self, slice: &CategoryTotal) -> f64 {
        let total = self.total.value();
        if total <= 0.0 {
            return 0.0;
        }
        (slice.total.value() / total).clamp(0.0, 1.0)
    }
}
