// ═══════════════════════════════════════════════════════════════════
// Model Tests — lenient wire decoding, write-path drafts, display impls
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use serde_json::json;

use mtaa_hustle_core::models::debt::{Debt, DebtDraft, DebtQuery, DebtStatus, DebtUpdate};
use mtaa_hustle_core::models::hustle::{Hustle, HustleDraft, HustleStatus};
use mtaa_hustle_core::models::transaction::{Transaction, TransactionDraft, TransactionKind};
use mtaa_hustle_core::models::user::{SignupProfile, User};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Transaction decoding
// ═══════════════════════════════════════════════════════════════════

mod transaction_decoding {
    use super::*;

    #[test]
    fn full_record_decodes() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 12,
            "type": "income",
            "amount": 1200.5,
            "description": "Saturday market",
            "category": "sales",
            "notes": "cash",
            "tags": ["market", "weekend"],
            "date": "2025-07-12",
            "hustle_id": 3
        }))
        .unwrap();

        assert_eq!(tx.id, Some(12));
        assert_eq!(tx.kind, Some(TransactionKind::Income));
        assert_eq!(tx.amount, Some(1200.5));
        assert_eq!(tx.description, "Saturday market");
        assert_eq!(tx.tags, vec!["market", "weekend"]);
        assert_eq!(tx.date, Some(date(2025, 7, 12)));
        assert_eq!(tx.hustle_id, Some(3));
    }

    #[test]
    fn numeric_string_amount_is_coerced() {
        let tx: Transaction =
            serde_json::from_value(json!({ "type": "expense", "amount": "450.75" })).unwrap();
        assert_eq!(tx.amount, Some(450.75));
    }

    #[test]
    fn garbage_amount_becomes_none() {
        for bad in [json!("abc"), json!(null), json!({"v": 1}), json!(true)] {
            let tx: Transaction =
                serde_json::from_value(json!({ "type": "income", "amount": bad })).unwrap();
            assert_eq!(tx.amount, None, "amount should be rejected");
        }
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let tx: Transaction = serde_json::from_value(json!({})).unwrap();
        assert_eq!(tx.id, None);
        assert_eq!(tx.kind, None);
        assert_eq!(tx.amount, None);
        assert_eq!(tx.date, None);
        assert_eq!(tx.hustle_id, None);
        assert!(tx.tags.is_empty());
        assert!(tx.description.is_empty());
    }

    #[test]
    fn kind_is_case_insensitive_and_unknowns_become_none() {
        let tx: Transaction = serde_json::from_value(json!({ "type": "INCOME" })).unwrap();
        assert_eq!(tx.kind, Some(TransactionKind::Income));

        let tx: Transaction = serde_json::from_value(json!({ "type": "transfer" })).unwrap();
        assert_eq!(tx.kind, None);
    }

    #[test]
    fn date_accepts_plain_and_timestamp_forms() {
        for raw in [
            "2025-07-12",
            "2025-07-12T09:30:00",
            "2025-07-12T09:30:00+03:00",
            "Sat, 12 Jul 2025 09:30:00 GMT",
        ] {
            let tx: Transaction = serde_json::from_value(json!({ "date": raw })).unwrap();
            assert_eq!(tx.date, Some(date(2025, 7, 12)), "failed for {raw}");
        }
    }

    #[test]
    fn unparseable_date_becomes_none() {
        let tx: Transaction = serde_json::from_value(json!({ "date": "last Tuesday" })).unwrap();
        assert_eq!(tx.date, None);
    }

    #[test]
    fn created_at_is_accepted_as_the_date_field() {
        let tx: Transaction =
            serde_json::from_value(json!({ "created_at": "2025-07-12T10:00:00" })).unwrap();
        assert_eq!(tx.date, Some(date(2025, 7, 12)));
    }

    #[test]
    fn comma_joined_tags_are_split() {
        let tx: Transaction =
            serde_json::from_value(json!({ "tags": "market, weekend ,, cash" })).unwrap();
        assert_eq!(tx.tags, vec!["market", "weekend", "cash"]);
    }

    #[test]
    fn convenience_constructors_fill_the_essentials() {
        let tx = Transaction::income(250.0, "airtime", date(2025, 7, 1)).with_hustle(9);
        assert_eq!(tx.kind, Some(TransactionKind::Income));
        assert_eq!(tx.amount, Some(250.0));
        assert_eq!(tx.hustle_id, Some(9));

        let tx = Transaction::expense(40.0, "fare", date(2025, 7, 1));
        assert_eq!(tx.kind, Some(TransactionKind::Expense));
        assert_eq!(tx.hustle_id, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transaction drafts (write path)
// ═══════════════════════════════════════════════════════════════════

mod transaction_drafts {
    use super::*;

    #[test]
    fn serializes_with_wire_names_and_comma_joined_tags() {
        let mut draft =
            TransactionDraft::new(TransactionKind::Income, 500.0, "goat milk", date(2025, 7, 3));
        draft.tags = vec!["dairy".into(), "morning".into()];
        draft.hustle_id = Some(2);

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["amount"], 500.0);
        assert_eq!(value["tags"], "dairy,morning");
        assert_eq!(value["date"], "2025-07-03");
        assert_eq!(value["hustle_id"], 2);
        // Unset optionals are omitted entirely.
        assert!(value.get("category").is_none());
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn empty_tags_are_omitted() {
        let draft = TransactionDraft::new(TransactionKind::Expense, 10.0, "fare", date(2025, 7, 3));
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn negative_amount_fails_validation() {
        let draft =
            TransactionDraft::new(TransactionKind::Income, -5.0, "oops", date(2025, 7, 3));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn non_finite_amount_fails_validation() {
        let draft =
            TransactionDraft::new(TransactionKind::Income, f64::NAN, "oops", date(2025, 7, 3));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn blank_description_fails_validation() {
        let draft = TransactionDraft::new(TransactionKind::Income, 5.0, "  ", date(2025, 7, 3));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn zero_amount_is_allowed() {
        let draft = TransactionDraft::new(TransactionKind::Income, 0.0, "promo", date(2025, 7, 3));
        assert!(draft.validate().is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Hustles
// ═══════════════════════════════════════════════════════════════════

mod hustles {
    use super::*;

    #[test]
    fn wire_type_maps_to_kind() {
        let hustle: Hustle = serde_json::from_value(json!({
            "id": 5,
            "title": "Boda Boda",
            "type": "transport",
            "location": "Kawangware",
            "date": "2024-11-01"
        }))
        .unwrap();
        assert_eq!(hustle.id, Some(5));
        assert_eq!(hustle.kind.as_deref(), Some("transport"));
        assert_eq!(hustle.location.as_deref(), Some("Kawangware"));
        assert_eq!(hustle.date, Some(date(2024, 11, 1)));
    }

    #[test]
    fn bare_record_still_decodes() {
        let hustle: Hustle = serde_json::from_value(json!({ "title": "Duka" })).unwrap();
        assert_eq!(hustle.id, None);
        assert_eq!(hustle.kind, None);
    }

    #[test]
    fn draft_requires_title_kind_and_description() {
        let mut draft = HustleDraft {
            title: "Duka".into(),
            kind: "retail".into(),
            location: None,
            description: "Corner shop".into(),
            date: date(2025, 1, 1),
        };
        assert!(draft.validate().is_ok());

        draft.title = " ".into();
        assert!(draft.validate().is_err());

        draft.title = "Duka".into();
        draft.kind = String::new();
        assert!(draft.validate().is_err());

        draft.kind = "retail".into();
        draft.description = String::new();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn draft_serializes_kind_as_type() {
        let draft = HustleDraft {
            title: "Duka".into(),
            kind: "retail".into(),
            location: None,
            description: "Corner shop".into(),
            date: date(2025, 1, 1),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "retail");
        assert!(value.get("location").is_none());
    }

    #[test]
    fn status_labels() {
        assert_eq!(HustleStatus::Active.to_string(), "active");
        assert_eq!(HustleStatus::NeedsAttention.to_string(), "needs_attention");
        assert_eq!(
            serde_json::to_value(HustleStatus::NeedsAttention).unwrap(),
            json!("needs_attention")
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Users & signup
// ═══════════════════════════════════════════════════════════════════

mod users {
    use super::*;

    #[test]
    fn profile_decodes_with_defaults() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "wanjiku",
            "email": "wanjiku@example.com"
        }))
        .unwrap();
        assert_eq!(user.id, 1);
        assert!(!user.is_admin);
        assert_eq!(user.created_at, None);
    }

    #[test]
    fn signup_profile_is_never_admin() {
        let profile = SignupProfile::new("wanjiku", "wanjiku@example.com", "hustle123");
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["is_admin"], false);
        assert_eq!(value["username"], "wanjiku");
    }

    #[test]
    fn signup_validation_rules() {
        assert!(SignupProfile::new("wanjiku", "w@example.com", "hustle123")
            .validate()
            .is_ok());
        assert!(SignupProfile::new("", "w@example.com", "hustle123")
            .validate()
            .is_err());
        assert!(SignupProfile::new("wanjiku", "not-an-email", "hustle123")
            .validate()
            .is_err());
        assert!(SignupProfile::new("wanjiku", "w@example.com", "short")
            .validate()
            .is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Debts
// ═══════════════════════════════════════════════════════════════════

mod debts {
    use super::*;

    #[test]
    fn record_decodes_with_snake_case_status() {
        let debt: Debt = serde_json::from_value(json!({
            "id": 2,
            "counterparty": "Mama Njeri",
            "amount": "1500",
            "description": "flour supply",
            "date": "2025-06-01",
            "due_date": "2025-09-01",
            "status": "partially_paid",
            "hustle_id": 1
        }))
        .unwrap();
        assert_eq!(debt.counterparty, "Mama Njeri");
        assert_eq!(debt.amount, Some(1500.0));
        assert_eq!(debt.status, Some(DebtStatus::PartiallyPaid));
        assert_eq!(debt.due_date, Some(date(2025, 9, 1)));
    }

    #[test]
    fn name_is_accepted_for_the_counterparty() {
        let debt: Debt = serde_json::from_value(json!({ "name": "Otieno" })).unwrap();
        assert_eq!(debt.counterparty, "Otieno");
    }

    #[test]
    fn unknown_status_fails_that_record_only() {
        let result: Result<Debt, _> = serde_json::from_value(json!({ "status": "forgiven" }));
        assert!(result.is_err());
    }

    #[test]
    fn draft_validation() {
        let mut draft = DebtDraft::new("Otieno", 300.0, "boda repair", date(2025, 7, 1));
        assert!(draft.validate().is_ok());
        assert_eq!(draft.status, DebtStatus::Pending);

        draft.counterparty = " ".into();
        assert!(draft.validate().is_err());

        draft.counterparty = "Otieno".into();
        draft.amount = -1.0;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn status_update_serializes_only_the_status() {
        let update = DebtUpdate::status(DebtStatus::Paid);
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "status": "paid" }));
    }

    #[test]
    fn query_renders_only_set_filters() {
        let query = DebtQuery {
            search: Some("njeri".into()),
            status: Some(DebtStatus::Pending),
            start_date: Some(date(2025, 1, 1)),
            end_date: None,
            hustle_id: Some(4),
        };
        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("search", "njeri".to_string()),
                ("status", "pending".to_string()),
                ("start_date", "2025-01-01".to_string()),
                ("hustle_id", "4".to_string()),
            ]
        );
    }

    #[test]
    fn blank_search_is_not_sent() {
        let query = DebtQuery {
            search: Some("   ".into()),
            ..DebtQuery::default()
        };
        assert!(query.params().is_empty());
    }

    #[test]
    fn status_labels() {
        assert_eq!(DebtStatus::Pending.to_string(), "pending");
        assert_eq!(DebtStatus::PartiallyPaid.to_string(), "partially_paid");
        assert_eq!(DebtStatus::Paid.to_string(), "paid");
    }
}
