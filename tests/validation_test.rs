/*!
 * Validation Unit Tests
 *
 * Every rule that guards a write:
 * - transaction fields (presence, name length, cost bounds and precision, date format)
 * - budget target bounds
 * - history search query parsing
 * - registration rules
 */

mod common;

use budget_tracker_server::models::{
    AmountInput, Category, HistoryQuery, Kind, RegisterPayload, TransactionDate,
};
use budget_tracker_server::validation::{
    ValidationError, parse_history_query, validate_budget_target, validate_password,
    validate_registration, validate_transaction, validate_username,
};
use common::*;

#[test]
fn valid_form_is_accepted_and_normalised() {
    let mut form = valid_form();
    form.name = "  Lunch  ".to_string();
    form.date = "5/3/2024".to_string();
    form.category = "Food".to_string();

    let new = validate_transaction(&form).expect("form should be valid");

    assert_eq!(new.name, "Lunch");
    assert_eq!(new.category, Category::Food);
    assert_eq!(new.kind, Kind::Expense);
    assert_eq!(new.cost, dec("12.50"));
    assert_eq!(new.date.to_string(), "05/03/2024");
    assert_eq!(new.description, "Sandwich and coffee");
}

#[test]
fn missing_fields_are_named() {
    for field in ["category", "name", "cost", "date", "type"] {
        let mut form = valid_form();
        match field {
            "category" => form.category.clear(),
            "name" => form.name = "   ".to_string(),
            "cost" => form.cost = AmountInput::from(""),
            "date" => form.date.clear(),
            _ => form.kind.clear(),
        }

        assert_eq!(
            validate_transaction(&form),
            Err(ValidationError::MissingField(field))
        );
    }
}

#[test]
fn description_is_optional() {
    let mut form = valid_form();
    form.description.clear();

    assert!(validate_transaction(&form).is_ok());
}

#[test]
fn name_of_thirty_characters_is_the_limit() {
    let mut form = valid_form();
    form.name = "a".repeat(30);
    assert!(validate_transaction(&form).is_ok());

    form.name = "a".repeat(31);
    assert_eq!(validate_transaction(&form), Err(ValidationError::NameTooLong));
}

#[test]
fn name_length_counts_characters_not_bytes() {
    let mut form = valid_form();
    form.name = "é".repeat(30);

    assert!(validate_transaction(&form).is_ok());
}

#[test]
fn cost_bounds() {
    for accepted in ["0", "1000000", "0.01", "999999.99"] {
        let mut form = valid_form();
        form.cost = AmountInput::from(accepted);
        assert!(
            validate_transaction(&form).is_ok(),
            "{accepted} should be accepted"
        );
    }

    for rejected in [
        "-1",
        "1000001",
        "1000000.01",
        "abc",
        "12.5.0",
        "1_000",
        "1000000.0000000000000000000000001",
    ] {
        let mut form = valid_form();
        form.cost = AmountInput::from(rejected);
        assert_eq!(
            validate_transaction(&form),
            Err(ValidationError::InvalidCost),
            "{rejected} should be rejected"
        );
    }
}

#[test]
fn cost_may_be_a_json_number() {
    let mut form = valid_form();
    form.cost = AmountInput::Number(42.5);

    assert_eq!(validate_transaction(&form).unwrap().cost, dec("42.50"));
}

#[test]
fn cost_has_at_most_two_decimal_places() {
    let mut form = valid_form();
    form.cost = AmountInput::from("10.999");
    assert_eq!(
        validate_transaction(&form),
        Err(ValidationError::TooManyDecimalPlaces)
    );

    // Trailing zeros are not extra precision.
    form.cost = AmountInput::from("10.500");
    assert!(validate_transaction(&form).is_ok());

    // Digits beyond Decimal precision are not rounded away.
    form.cost = AmountInput::from("0.0000000000000000000000000000001");
    assert_eq!(validate_transaction(&form), Err(ValidationError::InvalidCost));
}

#[test]
fn date_month_and_day_ranges() {
    for rejected in ["13/13/2024", "01/13/2024", "00/01/2024", "32/01/2024", "01/00/2024"] {
        let mut form = valid_form();
        form.date = rejected.to_string();
        assert_eq!(
            validate_transaction(&form),
            Err(ValidationError::InvalidDate),
            "{rejected} should be rejected"
        );
    }
}

#[test]
fn date_format_is_day_month_year() {
    for rejected in ["2024-03-15", "15-03-2024", "15/03/24", "15/03", "15/03/2024/1", "aa/bb/cccc"] {
        let mut form = valid_form();
        form.date = rejected.to_string();
        assert_eq!(
            validate_transaction(&form),
            Err(ValidationError::InvalidDate),
            "{rejected} should be rejected"
        );
    }
}

#[test]
fn date_check_is_structural_only() {
    for accepted in ["29/02/2024", "29/02/2023", "31/04/2024"] {
        let mut form = valid_form();
        form.date = accepted.to_string();
        assert!(
            validate_transaction(&form).is_ok(),
            "{accepted} should be accepted"
        );
    }
}

#[test]
fn unknown_category_and_kind_are_rejected() {
    let mut form = valid_form();
    form.category = "holidays".to_string();
    assert_eq!(
        validate_transaction(&form),
        Err(ValidationError::UnknownCategory("holidays".to_string()))
    );

    let mut form = valid_form();
    form.kind = "refund".to_string();
    assert_eq!(
        validate_transaction(&form),
        Err(ValidationError::UnknownKind("refund".to_string()))
    );
}

#[test]
fn every_category_is_accepted() {
    for category in Category::ALL {
        let mut form = valid_form();
        form.category = category.as_str().to_string();
        assert_eq!(validate_transaction(&form).unwrap().category, category);
    }
}

#[test]
fn error_messages_are_descriptive() {
    assert_eq!(
        ValidationError::NameTooLong.to_string(),
        "Transaction name must be 30 characters or less"
    );
    assert_eq!(
        ValidationError::InvalidCost.to_string(),
        "Please enter a valid cost between 0 and 1000000"
    );
    assert_eq!(
        ValidationError::MissingField("date").to_string(),
        "Please fill out all required fields: date is missing"
    );
}

#[test]
fn budget_target_bounds() {
    assert_eq!(validate_budget_target(&AmountInput::from("0")), Ok(dec("0")));
    assert_eq!(
        validate_budget_target(&AmountInput::from("1000000")),
        Ok(dec("1000000"))
    );
    assert_eq!(
        validate_budget_target(&AmountInput::Number(250.5)),
        Ok(dec("250.50"))
    );
    assert_eq!(
        validate_budget_target(&AmountInput::from("-0.01")),
        Err(ValidationError::BudgetNegative)
    );
    assert_eq!(
        validate_budget_target(&AmountInput::from("1000000.01")),
        Err(ValidationError::BudgetTooLarge)
    );
    assert_eq!(
        validate_budget_target(&AmountInput::from("lots")),
        Err(ValidationError::BudgetNotANumber)
    );
    assert_eq!(
        validate_budget_target(&AmountInput::from("")),
        Err(ValidationError::BudgetNotANumber)
    );
    assert_eq!(
        validate_budget_target(&AmountInput::from("10.125")),
        Err(ValidationError::TooManyDecimalPlaces)
    );
    assert_eq!(
        validate_budget_target(&AmountInput::from("1000000.0000000000000000000000001")),
        Err(ValidationError::BudgetNotANumber)
    );
    assert_eq!(
        validate_budget_target(&AmountInput::from("2_000")),
        Err(ValidationError::BudgetNotANumber)
    );
}

#[test]
fn transaction_date_parsing() {
    let parsed = TransactionDate::parse("09/11/2023").unwrap();
    assert_eq!((parsed.day(), parsed.month(), parsed.year()), (9, 11, 2023));

    assert_eq!(TransactionDate::parse_iso("2023-11-09"), Some(parsed));
    assert_eq!(TransactionDate::parse_iso("2023-13-09"), None);
    assert_eq!(TransactionDate::parse(" 9/11/2023 "), Some(parsed));
    assert_eq!(TransactionDate::parse("+9/11/2023"), None);
}

#[test]
fn empty_history_query_is_unconstrained() {
    let filter = parse_history_query(&HistoryQuery {
        name: Some(String::new()),
        category: Some(String::new()),
        start_date: Some(" ".to_string()),
        end_date: None,
    })
    .unwrap();

    assert!(filter.is_unconstrained());
}

#[test]
fn history_query_accepts_both_date_formats() {
    let filter = parse_history_query(&HistoryQuery {
        name: Some("Shop".to_string()),
        category: Some("food".to_string()),
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("31/01/2024".to_string()),
    })
    .unwrap();

    assert_eq!(filter.name_contains(), Some("shop"));
    assert_eq!(filter.category_equals, Some(Category::Food));
    assert_eq!(filter.start_date, Some(date("01/01/2024")));
    assert_eq!(filter.end_date, Some(date("31/01/2024")));
}

#[test]
fn history_query_rejects_bad_values() {
    let bad_date = HistoryQuery {
        end_date: Some("next week".to_string()),
        ..Default::default()
    };
    assert_eq!(
        parse_history_query(&bad_date),
        Err(ValidationError::InvalidFilterDate("end"))
    );

    let bad_category = HistoryQuery {
        category: Some("pets".to_string()),
        ..Default::default()
    };
    assert_eq!(
        parse_history_query(&bad_category),
        Err(ValidationError::UnknownCategory("pets".to_string()))
    );
}

#[test]
fn username_rules() {
    assert!(validate_username("alice_01").is_ok());
    assert_eq!(validate_username("  "), Err(ValidationError::Empty("Username")));
    assert_eq!(validate_username("abc"), Err(ValidationError::UsernameLength));
    assert_eq!(
        validate_username(&"a".repeat(51)),
        Err(ValidationError::UsernameLength)
    );
    assert_eq!(
        validate_username("alice smith"),
        Err(ValidationError::UsernameCharacters)
    );
}

#[test]
fn password_is_six_to_twelve_characters() {
    assert!(validate_password("secret").is_ok());
    assert!(validate_password("twelve_chars").is_ok());
    assert_eq!(validate_password("short"), Err(ValidationError::PasswordLength));
    assert_eq!(
        validate_password("thirteen_char"),
        Err(ValidationError::PasswordLength)
    );
}

#[test]
fn registration_trims_display_name() {
    let payload = RegisterPayload {
        username: "alice".to_string(),
        password: "hunter22".to_string(),
        display_name: Some("  Alice  ".to_string()),
    };
    assert_eq!(validate_registration(&payload), Ok(Some("Alice".to_string())));

    let payload = RegisterPayload {
        display_name: Some("   ".to_string()),
        ..payload
    };
    assert_eq!(validate_registration(&payload), Ok(None));

    let payload = RegisterPayload {
        display_name: Some("x".repeat(51)),
        ..payload
    };
    assert_eq!(
        validate_registration(&payload),
        Err(ValidationError::DisplayNameTooLong)
    );
}
