//! Transfer destination lists.
//!
//! Callers hand over `{"address": .., "amount": ..}` mappings with display
//! amounts; the wallet expects the same shape with atomic integer amounts.

use serde::Serialize;

use crate::error::ParamError;

use super::units::to_atomic;

/// A destination as callers write it: display amount, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub address: String,
    pub amount: f64,
}

impl Destination {
    pub fn new(address: impl Into<String>, amount: f64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

impl From<Destination> for serde_json::Value {
    fn from(destination: Destination) -> Self {
        serde_json::json!({
            "address": destination.address,
            "amount": destination.amount,
        })
    }
}

/// A validated destination in atomic units, as sent to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtomicDestination {
    pub address: String,
    pub amount: u64,
}

/// Validate and convert each destination, preserving order.
///
/// Keys are matched case-insensitively. Checks run per entry: presence of
/// both fields, then the amount type, then the address type.
pub fn normalize_destinations(
    destinations: &[serde_json::Value],
) -> Result<Vec<AtomicDestination>, ParamError> {
    destinations
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_one(index, entry))
        .collect()
}

fn normalize_one(index: usize, entry: &serde_json::Value) -> Result<AtomicDestination, ParamError> {
    let fields = entry.as_object().ok_or_else(|| {
        ParamError::InvalidArgument(format!(
            "destination {index} must be an object, got {}",
            json_type(entry)
        ))
    })?;

    let mut address = None;
    let mut amount = None;
    for (key, value) in fields {
        match key.to_lowercase().as_str() {
            "address" => address = Some(value),
            "amount" => amount = Some(value),
            _ => {}
        }
    }

    let address = address.ok_or(ParamError::MissingRequiredParameter {
        index,
        field: "address",
    })?;
    let amount = amount.ok_or(ParamError::MissingRequiredParameter {
        index,
        field: "amount",
    })?;

    let amount = amount.as_f64().ok_or_else(|| ParamError::AmountTypeError {
        index,
        found: json_type(amount).to_owned(),
    })?;
    let address = address
        .as_str()
        .ok_or_else(|| ParamError::AddressTypeError {
            index,
            found: json_type(address).to_owned(),
        })?;

    Ok(AtomicDestination {
        address: address.to_owned(),
        amount: to_atomic(amount)?,
    })
}

pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn converts_display_amounts_to_atomic() {
        let out = normalize_destinations(&[json!({"address": "A", "amount": 10.0})])
            .expect("valid destination");
        assert_eq!(
            out,
            vec![AtomicDestination {
                address: "A".to_owned(),
                amount: 10_000_000
            }]
        );
        assert_eq!(
            serde_json::to_value(&out).expect("must encode"),
            json!([{"address": "A", "amount": 10_000_000}])
        );
    }

    #[test]
    fn accepts_integer_amounts_and_mixed_case_keys() {
        let out = normalize_destinations(&[json!({"Address": "B", "AMOUNT": 3})])
            .expect("valid destination");
        assert_eq!(out[0].address, "B");
        assert_eq!(out[0].amount, 3_000_000);
    }

    #[test]
    fn preserves_input_order() {
        let out = normalize_destinations(&[
            json!({"address": "first", "amount": 1}),
            json!({"address": "second", "amount": 2.5}),
            json!({"address": "third", "amount": 0.000001}),
        ])
        .expect("valid destinations");
        let addresses: Vec<_> = out.iter().map(|d| d.address.as_str()).collect();
        assert_eq!(addresses, ["first", "second", "third"]);
        assert_eq!(out[2].amount, 1);
    }

    #[test]
    fn missing_address_is_reported() {
        let err = normalize_destinations(&[json!({"amount": 10.0})]).expect_err("must fail");
        assert!(matches!(
            err,
            ParamError::MissingRequiredParameter {
                index: 0,
                field: "address"
            }
        ));
    }

    #[test]
    fn missing_amount_is_reported_with_entry_index() {
        let err = normalize_destinations(&[
            json!({"address": "A", "amount": 1}),
            json!({"address": "B"}),
        ])
        .expect_err("must fail");
        assert!(matches!(
            err,
            ParamError::MissingRequiredParameter {
                index: 1,
                field: "amount"
            }
        ));
    }

    #[test]
    fn string_amount_is_a_type_error() {
        let err = normalize_destinations(&[json!({"address": "A", "amount": "10"})])
            .expect_err("must fail");
        assert!(matches!(err, ParamError::AmountTypeError { index: 0, ref found } if found == "string"));
    }

    #[test]
    fn boolean_amount_is_a_type_error() {
        let err = normalize_destinations(&[json!({"address": "A", "amount": true})])
            .expect_err("must fail");
        assert!(matches!(err, ParamError::AmountTypeError { .. }));
    }

    #[test]
    fn non_string_address_is_a_type_error() {
        let err = normalize_destinations(&[json!({"address": 42, "amount": 1.0})])
            .expect_err("must fail");
        assert!(matches!(err, ParamError::AddressTypeError { index: 0, ref found } if found == "number"));
    }

    #[test]
    fn amount_is_checked_before_address() {
        let err = normalize_destinations(&[json!({"address": 42, "amount": "x"})])
            .expect_err("must fail");
        assert!(matches!(err, ParamError::AmountTypeError { .. }));
    }

    #[test]
    fn non_object_entries_are_rejected() {
        let err = normalize_destinations(&[json!(["A", 1])]).expect_err("must fail");
        assert!(matches!(err, ParamError::InvalidArgument(ref m) if m.contains("must be an object")));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let err = normalize_destinations(&[json!({"address": "A", "amount": -1})])
            .expect_err("must fail");
        assert!(matches!(err, ParamError::InvalidArgument(_)));
    }

    #[test]
    fn typed_destination_converts_to_mapping() {
        let value: serde_json::Value = Destination::new("XCA1", 2.5).into();
        let out = normalize_destinations(&[value]).expect("valid destination");
        assert_eq!(out[0].amount, 2_500_000);
    }
}
