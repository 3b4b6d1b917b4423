//! Pending/Completed toggling.

use api_types::{EntryStatus, FinancialEntry};

/// The status a toggle moves to. `Canceled` stays put.
pub fn toggled_status(status: EntryStatus) -> Option<EntryStatus> {
    match status {
        EntryStatus::Pending => Some(EntryStatus::Completed),
        EntryStatus::Completed => Some(EntryStatus::Pending),
        EntryStatus::Canceled => None,
    }
}

/// A copy of `entry` with only its status flipped.
///
/// Returns `None` for canceled entries and for statuses this client does not
/// know, in which case nothing should be sent.
pub fn toggled(entry: &FinancialEntry) -> Option<FinancialEntry> {
    let next = toggled_status(entry.status_kind()?)?;
    let mut updated = entry.clone();
    updated.status = Some(next.into());
    Some(updated)
}

#[cfg(test)]
mod tests {
    use api_types::Choice;
    use serde_json::json;

    use super::*;

    fn entry(status: &str) -> FinancialEntry {
        serde_json::from_value(json!({
            "id": 4,
            "amount": 20,
            "date": "2024-05-02",
            "description": "Power bill",
            "category": "Utilities",
            "paymentMethod": "Bank Transfer",
            "status": status,
            "notes": "May"
        }))
        .unwrap()
    }

    #[test]
    fn pending_becomes_completed_and_nothing_else_changes() {
        let before = entry("Pending");
        let after = toggled(&before).unwrap();

        assert_eq!(after.status, Some(Choice::Known(EntryStatus::Completed)));
        let mut expected = before.clone();
        expected.status = after.status.clone();
        assert_eq!(after, expected);
    }

    #[test]
    fn completed_goes_back_to_pending() {
        let after = toggled(&entry("Completed")).unwrap();
        assert_eq!(after.status_kind(), Some(EntryStatus::Pending));
    }

    #[test]
    fn canceled_and_unknown_are_left_alone() {
        assert!(toggled(&entry("Canceled")).is_none());
        assert!(toggled(&entry("On hold")).is_none());
    }
}
