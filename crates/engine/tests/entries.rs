use api_types::{Category, EntryStatus, FinancialEntry, PaymentMethod};
use engine::{EngineError, EntryForm, Paginator, Summary, filter_entries, matches, toggled};
use serde_json::json;

fn sample() -> Vec<FinancialEntry> {
    serde_json::from_value(json!([
        { "id": 1, "amount": 1200, "date": "2024-01-01", "description": "January rent",
          "category": "Rent", "paymentMethod": "Bank Transfer", "status": "Completed" },
        { "id": 2, "amount": 54.3, "date": "2024-01-03", "description": "Weekly shop",
          "category": "Groceries", "paymentMethod": "Debit Card", "status": "Completed" },
        { "id": 3, "amount": 80, "date": "2024-01-09", "description": "Electricity",
          "category": "Utilities", "paymentMethod": "Credit Card", "status": "Pending" },
        { "id": 4, "amount": "n/a", "date": "2024-01-12", "description": "Cinema",
          "category": "Entertainment", "status": "Canceled" },
        { "id": 5, "amount": 2.75, "date": "2024-02-02", "description": "Bus ticket",
          "category": "Transportation", "paymentMethod": "Cash", "status": "Pending" },
        { "id": 6, "amount": 61.2, "date": "2024-02-04", "title": "Market",
          "category": "Groceries", "paymentMethod": "Cash", "status": "Completed" },
        { "id": 7 }
    ]))
    .unwrap()
}

const TERMS: &[&str] = &[
    "", "rent", "RENT", "2024-01", "pending", "5", ".", "groceries", "market", "n/a", "zzz",
];

#[test]
fn filter_is_sound_and_complete() {
    let entries = sample();
    for term in TERMS {
        let filtered = filter_entries(&entries, term);

        for entry in &filtered {
            assert!(entries.iter().any(|e| e.id == entry.id));
        }
        let expected: Vec<_> = entries.iter().filter(|e| matches(e, term)).collect();
        assert_eq!(filtered, expected, "term {term:?}");
    }
}

#[test]
fn category_totals_add_up_to_total() {
    let entries = sample();
    for term in TERMS {
        let filtered = filter_entries(&entries, term);
        let summary = Summary::from_entries(filtered);

        let slices: f64 = summary
            .categories
            .iter()
            .map(|slice| slice.total.value())
            .sum();
        assert!(
            (slices - summary.total.value()).abs() < 1e-9,
            "term {term:?}: {slices} != {}",
            summary.total.value()
        );
    }
}

#[test]
fn pages_concatenate_back_to_the_list() {
    let entries = sample();
    for term in TERMS {
        let filtered = filter_entries(&entries, term);
        for size in 1..=8 {
            let mut pager = Paginator::new(size);
            let pages = pager.page_count(filtered.len());
            let mut joined = Vec::new();
            for _ in 0..pages {
                joined.extend_from_slice(pager.page(&filtered));
                pager.next(filtered.len());
            }
            assert_eq!(joined, filtered, "term {term:?}, size {size}");
        }
    }
}

#[test]
fn rent_and_cash_example() {
    let entries: Vec<FinancialEntry> = serde_json::from_value(json!([
        { "id": 1, "amount": 50, "category": "Rent" },
        { "id": 2, "amount": 20, "category": "Rent" },
        { "id": 3, "amount": 30, "category": "Cash" }
    ]))
    .unwrap();

    let summary = Summary::from_entries(filter_entries(&entries, ""));
    assert_eq!(summary.total_display(), "100.00");
    assert_eq!(summary.labels(), vec!["Rent", "Cash"]);
    let totals: Vec<f64> = summary.categories.iter().map(|c| c.total.value()).collect();
    assert_eq!(totals, vec![70.0, 30.0]);
}

#[test]
fn negative_amount_is_rejected_before_submitting() {
    let form = EntryForm {
        amount: "-5".to_string(),
        description: "Refund?".to_string(),
        date: "2024-03-03".to_string(),
        category: Some(Category::Entertainment),
        payment_method: Some(PaymentMethod::CreditCard),
        status: Some(EntryStatus::Pending),
        notes: String::new(),
    };
    assert!(matches!(
        form.validate_new(),
        Err(EngineError::InvalidAmount(_))
    ));
}

#[test]
fn toggling_pending_only_changes_status() {
    let entries = sample();
    let pending = entries.iter().find(|e| e.id.to_string() == "3").unwrap();

    let updated = toggled(pending).unwrap();
    let before = serde_json::to_value(pending).unwrap();
    let after = serde_json::to_value(&updated).unwrap();

    assert_eq!(after["status"], json!("Completed"));
    let mut expected = before.clone();
    expected["status"] = json!("Completed");
    assert_eq!(after, expected);
}

#[test]
fn twelve_entries_three_pages() {
    let entries: Vec<FinancialEntry> = (1..=12)
        .map(|id| serde_json::from_value(json!({ "id": id, "amount": id })).unwrap())
        .collect();
    let filtered = filter_entries(&entries, "");

    let mut pager = Paginator::default();
    assert_eq!(pager.page_count(filtered.len()), 3);
    pager.next(filtered.len());
    pager.next(filtered.len());
    assert_eq!(pager.page(&filtered).len(), 2);
}
