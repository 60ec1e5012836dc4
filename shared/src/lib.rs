use serde::{Deserialize, Serialize};
use std::fmt;

/// Cash denominations offered by the form, largest first. The panel and
/// the outgoing payload always carry exactly these values in this order.
pub const DENOMINATION_VALUES: [u32; 10] = [2000, 500, 200, 100, 50, 20, 10, 5, 2, 1];

/// A bill line item as sent to the bill-generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    pub product_code: String,
    pub quantity: u32,
}

/// A cash denomination tally entry as sent to the bill-generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenominationEntry {
    pub value: u32,
    pub count: u32,
}

/// Request for generating a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBillRequest {
    pub customer_email: String,
    /// Eligible line items in entry order; at least one entry
    pub items: Vec<BillItem>,
    /// Always the full fixed denomination set, descending
    pub denominations: Vec<DenominationEntry>,
    /// Rounded to 2 decimal places
    pub paid_amount: f64,
}

/// Response after generating a bill. The collaborator may omit the
/// customer email, in which case navigation falls back to the email
/// that was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBillResponse {
    pub bill_id: String,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// One editable product row. Inputs stay raw strings; parsing happens
/// only inside `validate_bill_form`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    pub product_code: String,
    pub quantity_input: String,
}

impl LineItemRow {
    /// A freshly added row: empty code, quantity 1.
    pub fn new() -> Self {
        Self {
            product_code: String::new(),
            quantity_input: "1".to_string(),
        }
    }
}

impl Default for LineItemRow {
    fn default() -> Self {
        Self::new()
    }
}

/// One editable denomination count, tied to a fixed denomination value.
/// Only the count input is mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct DenominationRow {
    pub value: u32,
    pub count_input: String,
}

/// The ten denomination rows in display order, all counts zero.
pub fn default_denomination_rows() -> Vec<DenominationRow> {
    DENOMINATION_VALUES
        .iter()
        .map(|&value| DenominationRow {
            value,
            count_input: "0".to_string(),
        })
        .collect()
}

/// Immutable read of the whole form, taken once per submit attempt and
/// passed by value through validation and submission. Never cached
/// between attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct BillFormSnapshot {
    pub customer_email: String,
    pub rows: Vec<LineItemRow>,
    pub denominations: Vec<DenominationRow>,
    pub paid_amount_input: String,
}

/// Which input inside a product row a validation error points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    ProductCode,
    Quantity,
}

/// A single validation failure from one pass. Row numbers are 1-based,
/// matching what the operator sees on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum BillFormError {
    EmailRequired,
    EmailInvalid,
    ProductCodeRequired { row: usize },
    QuantityInvalid { row: usize },
    NoValidItems,
    DenominationCountInvalid { value: u32 },
    PaidAmountInvalid,
}

impl BillFormError {
    /// Message shown in the aggregate error list.
    pub fn message(&self) -> String {
        match self {
            BillFormError::EmailRequired => "Customer email is required.".to_string(),
            BillFormError::EmailInvalid => "Enter a valid email address.".to_string(),
            BillFormError::ProductCodeRequired { row } => {
                format!("Product row {}: product ID required.", row)
            }
            BillFormError::QuantityInvalid { row } => {
                format!("Product row {}: quantity must be at least 1.", row)
            }
            BillFormError::NoValidItems => "Add at least one valid product.".to_string(),
            BillFormError::DenominationCountInvalid { value } => {
                format!("Denomination ₹{}: count must be a whole number (0 or more).", value)
            }
            BillFormError::PaidAmountInvalid => {
                "Paid amount must be a valid number (>= 0).".to_string()
            }
        }
    }

    /// The 1-based product row this error belongs to, if row-scoped.
    pub fn row(&self) -> Option<usize> {
        match self {
            BillFormError::ProductCodeRequired { row }
            | BillFormError::QuantityInvalid { row } => Some(*row),
            _ => None,
        }
    }

    /// The row input to mark invalid, if row-scoped.
    pub fn row_field(&self) -> Option<RowField> {
        match self {
            BillFormError::ProductCodeRequired { .. } => Some(RowField::ProductCode),
            BillFormError::QuantityInvalid { .. } => Some(RowField::Quantity),
            _ => None,
        }
    }

    /// The denomination value whose count input should be marked invalid.
    pub fn denomination_value(&self) -> Option<u32> {
        match self {
            BillFormError::DenominationCountInvalid { value } => Some(*value),
            _ => None,
        }
    }

    /// Short text rendered inline under the offending row input.
    pub fn inline_message(&self) -> Option<&'static str> {
        match self {
            BillFormError::ProductCodeRequired { .. } => Some("Product ID required"),
            BillFormError::QuantityInvalid { .. } => Some("Quantity must be at least 1"),
            _ => None,
        }
    }
}

impl fmt::Display for BillFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Result of one validation pass, including the cleaned values a
/// submission needs. `items` holds the eligible rows even when the pass
/// failed; `paid_amount` is `None` exactly when the paid-amount rule
/// fired.
#[derive(Debug, Clone, PartialEq)]
pub struct BillFormValidation {
    pub is_valid: bool,
    pub errors: Vec<BillFormError>,
    pub items: Vec<BillItem>,
    pub denominations: Vec<DenominationEntry>,
    pub paid_amount: Option<f64>,
}

impl BillFormValidation {
    /// Assemble the wire request from a zero-error pass. Returns `None`
    /// when any rule fired, so a request can never be built from an
    /// invalid snapshot.
    pub fn to_request(&self, snapshot: &BillFormSnapshot) -> Option<CreateBillRequest> {
        if !self.is_valid {
            return None;
        }
        Some(CreateBillRequest {
            customer_email: snapshot.customer_email.trim().to_string(),
            items: self.items.clone(),
            denominations: self.denominations.clone(),
            paid_amount: self.paid_amount.unwrap_or(0.0),
        })
    }
}

/// Validate a snapshot of the bill form. Pure function: every rule is
/// evaluated, the result is the union of all failures, and no rule
/// short-circuits another.
///
/// Rule order (which is also render order for the aggregate list):
/// email, per-row checks in display order, the at-least-one-item
/// aggregate, denomination counts, paid amount.
pub fn validate_bill_form(snapshot: &BillFormSnapshot) -> BillFormValidation {
    let mut errors = Vec::new();

    let email = snapshot.customer_email.trim();
    if email.is_empty() {
        errors.push(BillFormError::EmailRequired);
    } else if !is_valid_email(email) {
        errors.push(BillFormError::EmailInvalid);
    }

    let mut items = Vec::new();
    for (index, row) in snapshot.rows.iter().enumerate() {
        let row_number = index + 1;
        let code = row.product_code.trim();
        // "1.5", "abc" and "-3" all fail the strict integer parse.
        let quantity = row.quantity_input.trim().parse::<u32>().unwrap_or(0);

        if code.is_empty() {
            errors.push(BillFormError::ProductCodeRequired { row: row_number });
        }
        if quantity == 0 {
            errors.push(BillFormError::QuantityInvalid { row: row_number });
        }
        if !code.is_empty() && quantity > 0 {
            items.push(BillItem {
                product_code: code.to_string(),
                quantity,
            });
        }
    }
    if items.is_empty() {
        errors.push(BillFormError::NoValidItems);
    }

    let mut denominations = Vec::new();
    for row in &snapshot.denominations {
        match parse_denomination_count(&row.count_input) {
            Some(count) => denominations.push(DenominationEntry {
                value: row.value,
                count,
            }),
            None => errors.push(BillFormError::DenominationCountInvalid { value: row.value }),
        }
    }

    let paid_amount = parse_paid_amount(&snapshot.paid_amount_input);
    if paid_amount.is_none() {
        errors.push(BillFormError::PaidAmountInvalid);
    }

    BillFormValidation {
        is_valid: errors.is_empty(),
        errors,
        items,
        denominations,
        paid_amount,
    }
}

/// Mirrors the form's email pattern: no whitespace anywhere, exactly one
/// `@` with a non-empty local part, and a domain containing a dot with
/// at least one character on each side of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// Denomination counts must be whole and non-negative; an untouched or
/// cleared input counts as zero.
fn parse_denomination_count(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<u32>().ok()
}

/// Paid amount parses as a non-negative decimal; an empty input counts
/// as zero. The returned value is already rounded to cents.
fn parse_paid_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(amount) if amount >= 0.0 => Some(round_to_cents(amount)),
        _ => None,
    }
}

/// Round to 2 decimal places for the wire.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_snapshot() -> BillFormSnapshot {
        BillFormSnapshot {
            customer_email: "a@b.com".to_string(),
            rows: vec![LineItemRow {
                product_code: "P001".to_string(),
                quantity_input: "2".to_string(),
            }],
            denominations: default_denomination_rows(),
            paid_amount_input: "100".to_string(),
        }
    }

    #[test]
    fn test_empty_email_reports_required_only() {
        let mut snapshot = valid_snapshot();
        snapshot.customer_email = "   ".to_string();

        let validation = validate_bill_form(&snapshot);
        assert!(!validation.is_valid);
        assert!(validation.errors.contains(&BillFormError::EmailRequired));
        assert!(!validation.errors.contains(&BillFormError::EmailInvalid));
    }

    #[test]
    fn test_malformed_email_reports_pattern_only() {
        for email in ["foo", "foo@bar", "a b@c.d", "a@.c", "@b.com", "a@"] {
            let mut snapshot = valid_snapshot();
            snapshot.customer_email = email.to_string();

            let validation = validate_bill_form(&snapshot);
            assert!(
                validation.errors.contains(&BillFormError::EmailInvalid),
                "expected pattern error for {:?}",
                email
            );
            assert!(!validation.errors.contains(&BillFormError::EmailRequired));
        }
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));

        assert!(!is_valid_email("foo"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("two@@at.com"));
        assert!(!is_valid_email("has space@b.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn test_blank_row_reports_both_errors() {
        let mut snapshot = valid_snapshot();
        snapshot.rows = vec![LineItemRow {
            product_code: String::new(),
            quantity_input: "0".to_string(),
        }];

        let validation = validate_bill_form(&snapshot);
        let row_errors: Vec<&BillFormError> = validation
            .errors
            .iter()
            .filter(|error| error.row() == Some(1))
            .collect();
        assert_eq!(row_errors.len(), 2);
        assert!(validation.errors.contains(&BillFormError::ProductCodeRequired { row: 1 }));
        assert!(validation.errors.contains(&BillFormError::QuantityInvalid { row: 1 }));
    }

    #[test]
    fn test_valid_row_reports_no_row_errors() {
        let validation = validate_bill_form(&valid_snapshot());
        assert!(validation.is_valid, "errors: {:?}", validation.errors);
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn test_unparseable_quantity_is_invalid() {
        for quantity in ["", "abc", "-3", "1.5"] {
            let mut snapshot = valid_snapshot();
            snapshot.rows[0].quantity_input = quantity.to_string();

            let validation = validate_bill_form(&snapshot);
            assert!(
                validation.errors.contains(&BillFormError::QuantityInvalid { row: 1 }),
                "expected quantity error for {:?}",
                quantity
            );
        }
    }

    #[test]
    fn test_all_rows_ineligible_adds_aggregate_error() {
        let mut snapshot = valid_snapshot();
        snapshot.rows = vec![
            LineItemRow {
                product_code: String::new(),
                quantity_input: "1".to_string(),
            },
            LineItemRow {
                product_code: "P002".to_string(),
                quantity_input: "0".to_string(),
            },
        ];

        let validation = validate_bill_form(&snapshot);
        // Aggregate error is additional to the per-row messages.
        assert!(validation.errors.contains(&BillFormError::NoValidItems));
        assert!(validation.errors.contains(&BillFormError::ProductCodeRequired { row: 1 }));
        assert!(validation.errors.contains(&BillFormError::QuantityInvalid { row: 2 }));
        assert!(validation.items.is_empty());
    }

    #[test]
    fn test_only_eligible_rows_reach_the_item_list() {
        let mut snapshot = valid_snapshot();
        snapshot.rows = vec![
            LineItemRow {
                product_code: "  P001 ".to_string(),
                quantity_input: "2".to_string(),
            },
            LineItemRow {
                product_code: String::new(),
                quantity_input: "4".to_string(),
            },
            LineItemRow {
                product_code: "P003".to_string(),
                quantity_input: "1".to_string(),
            },
        ];

        let validation = validate_bill_form(&snapshot);
        assert_eq!(
            validation.items,
            vec![
                BillItem {
                    product_code: "P001".to_string(),
                    quantity: 2,
                },
                BillItem {
                    product_code: "P003".to_string(),
                    quantity: 1,
                },
            ]
        );
        // The failing middle row still blocks submission.
        assert!(!validation.is_valid);
    }

    #[test]
    fn test_duplicate_product_codes_are_permitted() {
        let mut snapshot = valid_snapshot();
        snapshot.rows = vec![
            LineItemRow {
                product_code: "P001".to_string(),
                quantity_input: "1".to_string(),
            },
            LineItemRow {
                product_code: "P001".to_string(),
                quantity_input: "3".to_string(),
            },
        ];

        let validation = validate_bill_form(&snapshot);
        assert!(validation.is_valid);
        assert_eq!(validation.items.len(), 2);
    }

    #[test]
    fn test_paid_amount_rules() {
        for paid in ["-5", "abc"] {
            let mut snapshot = valid_snapshot();
            snapshot.paid_amount_input = paid.to_string();
            let validation = validate_bill_form(&snapshot);
            assert!(
                validation.errors.contains(&BillFormError::PaidAmountInvalid),
                "expected paid-amount error for {:?}",
                paid
            );
            assert_eq!(validation.paid_amount, None);
        }

        for paid in ["0", "12.5"] {
            let mut snapshot = valid_snapshot();
            snapshot.paid_amount_input = paid.to_string();
            let validation = validate_bill_form(&snapshot);
            assert!(validation.is_valid, "unexpected errors for {:?}", paid);
        }
    }

    #[test]
    fn test_empty_paid_amount_counts_as_zero() {
        let mut snapshot = valid_snapshot();
        snapshot.paid_amount_input = String::new();

        let validation = validate_bill_form(&snapshot);
        assert!(validation.is_valid);
        assert_eq!(validation.paid_amount, Some(0.0));
    }

    #[test]
    fn test_default_denomination_rows() {
        let rows = default_denomination_rows();
        assert_eq!(rows.len(), 10);
        let values: Vec<u32> = rows.iter().map(|row| row.value).collect();
        assert_eq!(values, DENOMINATION_VALUES.to_vec());
        assert!(rows.iter().all(|row| row.count_input == "0"));
    }

    #[test]
    fn test_denomination_count_rules() {
        for count in ["-1", "abc", "1.5"] {
            let mut snapshot = valid_snapshot();
            snapshot.denominations[0].count_input = count.to_string();
            let validation = validate_bill_form(&snapshot);
            assert!(
                validation
                    .errors
                    .contains(&BillFormError::DenominationCountInvalid { value: 2000 }),
                "expected denomination error for {:?}",
                count
            );
        }

        // Cleared and touched-but-sane inputs are both fine.
        for count in ["", "3"] {
            let mut snapshot = valid_snapshot();
            snapshot.denominations[0].count_input = count.to_string();
            let validation = validate_bill_form(&snapshot);
            assert!(validation.is_valid, "unexpected errors for {:?}", count);
        }
    }

    #[test]
    fn test_empty_denomination_count_parses_as_zero() {
        let mut snapshot = valid_snapshot();
        snapshot.denominations[3].count_input = String::new();

        let validation = validate_bill_form(&snapshot);
        assert_eq!(validation.denominations[3].count, 0);
        assert_eq!(validation.denominations[3].value, 100);
    }

    #[test]
    fn test_error_order_matches_rule_order() {
        let snapshot = BillFormSnapshot {
            customer_email: "not-an-email".to_string(),
            rows: vec![LineItemRow {
                product_code: String::new(),
                quantity_input: "0".to_string(),
            }],
            denominations: {
                let mut rows = default_denomination_rows();
                rows[0].count_input = "-1".to_string();
                rows
            },
            paid_amount_input: "abc".to_string(),
        };

        let validation = validate_bill_form(&snapshot);
        assert_eq!(
            validation.errors,
            vec![
                BillFormError::EmailInvalid,
                BillFormError::ProductCodeRequired { row: 1 },
                BillFormError::QuantityInvalid { row: 1 },
                BillFormError::NoValidItems,
                BillFormError::DenominationCountInvalid { value: 2000 },
                BillFormError::PaidAmountInvalid,
            ]
        );
    }

    #[test]
    fn test_round_trip_request() {
        let mut snapshot = valid_snapshot();
        snapshot.customer_email = "  a@b.com ".to_string();

        let validation = validate_bill_form(&snapshot);
        let request = validation.to_request(&snapshot).expect("valid snapshot");

        assert_eq!(request.customer_email, "a@b.com");
        assert_eq!(
            request.items,
            vec![BillItem {
                product_code: "P001".to_string(),
                quantity: 2,
            }]
        );
        assert_eq!(request.denominations.len(), 10);
        assert!(request.denominations.iter().all(|entry| entry.count == 0));
        assert_eq!(request.paid_amount, 100.0);
    }

    #[test]
    fn test_no_request_from_invalid_pass() {
        let mut snapshot = valid_snapshot();
        snapshot.customer_email = String::new();

        let validation = validate_bill_form(&snapshot);
        assert_eq!(validation.to_request(&snapshot), None);
    }

    #[test]
    fn test_request_wire_format() {
        let snapshot = valid_snapshot();
        let validation = validate_bill_form(&snapshot);
        let request = validation.to_request(&snapshot).expect("valid snapshot");

        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(json["customer_email"], "a@b.com");
        assert_eq!(json["items"][0]["product_code"], "P001");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["denominations"][0]["value"], 2000);
        assert_eq!(json["denominations"][0]["count"], 0);
        assert_eq!(json["denominations"][9]["value"], 1);
        assert_eq!(json["paid_amount"], 100.0);
    }

    #[test]
    fn test_response_tolerates_missing_customer_email() {
        let response: CreateBillResponse =
            serde_json::from_str(r#"{"bill_id":"B1"}"#).expect("deserializable");
        assert_eq!(response.bill_id, "B1");
        assert_eq!(response.customer_email, None);

        let response: CreateBillResponse =
            serde_json::from_str(r#"{"bill_id":"B1","customer_email":"a@b.com"}"#)
                .expect("deserializable");
        assert_eq!(response.customer_email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(100.0), 100.0);
        assert_eq!(round_to_cents(12.5), 12.5);
        assert_eq!(round_to_cents(10.126), 10.13);
        assert_eq!(round_to_cents(99.999), 100.0);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BillFormError::EmailRequired.message(),
            "Customer email is required."
        );
        assert_eq!(
            BillFormError::EmailInvalid.message(),
            "Enter a valid email address."
        );
        assert_eq!(
            BillFormError::ProductCodeRequired { row: 2 }.message(),
            "Product row 2: product ID required."
        );
        assert_eq!(
            BillFormError::QuantityInvalid { row: 3 }.message(),
            "Product row 3: quantity must be at least 1."
        );
        assert_eq!(
            BillFormError::NoValidItems.message(),
            "Add at least one valid product."
        );
        assert_eq!(
            BillFormError::PaidAmountInvalid.message(),
            "Paid amount must be a valid number (>= 0)."
        );
    }

    #[test]
    fn test_error_scopes() {
        assert_eq!(BillFormError::EmailRequired.row(), None);
        assert_eq!(BillFormError::ProductCodeRequired { row: 4 }.row(), Some(4));
        assert_eq!(
            BillFormError::ProductCodeRequired { row: 4 }.row_field(),
            Some(RowField::ProductCode)
        );
        assert_eq!(
            BillFormError::QuantityInvalid { row: 4 }.row_field(),
            Some(RowField::Quantity)
        );
        assert_eq!(
            BillFormError::DenominationCountInvalid { value: 50 }.denomination_value(),
            Some(50)
        );
        assert_eq!(BillFormError::PaidAmountInvalid.row(), None);
    }
}
