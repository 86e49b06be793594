//! Declarative schemas for the optional parameters that wallet operations
//! forward to the remote API.
//!
//! Each schema lists the accepted keys and their JSON types. Anything else
//! is rejected locally instead of costing a round trip.

use serde_json::{Map, Value};

use crate::error::ParamError;

use super::destinations::json_type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    UInt,
    UIntList,
    Str,
}

impl FieldKind {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Bool => value.is_boolean(),
            Self::UInt => value.is_u64(),
            Self::UIntList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_u64)),
            Self::Str => value.is_string(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::UInt => "a non-negative integer",
            Self::UIntList => "an array of non-negative integers",
            Self::Str => "a string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSchema {
    pub operation: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ParamSchema {
    pub fn allowed(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Reject unknown keys, then keys whose value has the wrong JSON type.
    pub fn check(&self, supplied: &Map<String, Value>) -> Result<(), ParamError> {
        check_allowed_keys(&self.allowed(), supplied)?;

        for field in self.fields {
            let Some(value) = supplied.get(field.name) else {
                continue;
            };
            if !field.kind.matches(value) {
                return Err(ParamError::InvalidArgument(format!(
                    "`{}`: parameter `{}` must be {}, got {}",
                    self.operation,
                    field.name,
                    field.kind.describe(),
                    json_type(value)
                )));
            }
        }
        Ok(())
    }

    /// [`check`](Self::check) `extra`, then merge it over `params`.
    pub fn merge_into(
        &self,
        params: &mut Map<String, Value>,
        extra: Map<String, Value>,
    ) -> Result<(), ParamError> {
        self.check(&extra)?;
        params.extend(extra);
        Ok(())
    }
}

/// Fail on the first key of `supplied` that is not in `allowed`.
pub fn check_allowed_keys(
    allowed: &[&'static str],
    supplied: &Map<String, Value>,
) -> Result<(), ParamError> {
    match supplied.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ParamError::ParamNotSupported {
            key: key.clone(),
            allowed: allowed.to_vec(),
        }),
        None => Ok(()),
    }
}

// ==============================================================================
// Wallet Operation Schemas
// ==============================================================================

use FieldKind::{Bool, Str, UInt, UIntList};

const TRANSFER_FIELDS: &[FieldSpec] = &[
    field("account_index", UInt),
    field("subaddr_indices", UIntList),
    field("get_tx_key", Bool),
    field("ring_size", UInt),
    field("payment_id", Str),
    field("do_not_relay", Bool),
    field("get_tx_metadata", Bool),
];

const SWEEP_FIELDS: &[FieldSpec] = &[
    field("subaddr_indices", UIntList),
    field("priority", UInt),
    field("payment_id", Str),
    field("ring_size", UInt),
    field("get_tx_keys", Bool),
    field("below_amount", UInt),
    field("do_not_relay", Bool),
    field("get_tx_hex", Bool),
    field("get_tx_metadata", Bool),
];

pub const TRANSFER: ParamSchema = ParamSchema {
    operation: "transfer",
    fields: TRANSFER_FIELDS,
};

pub const TRANSFER_SPLIT: ParamSchema = ParamSchema {
    operation: "transfer_split",
    fields: &[
        field("account_index", UInt),
        field("subaddr_indices", UIntList),
        field("get_tx_key", Bool),
        field("ring_size", UInt),
        field("payment_id", Str),
        field("do_not_relay", Bool),
        field("get_tx_metadata", Bool),
        field("new_algorithm", Bool),
    ],
};

pub const SWEEP_DUST: ParamSchema = ParamSchema {
    operation: "sweep_dust",
    fields: &[
        field("get_tx_keys", Bool),
        field("do_not_relay", Bool),
        field("get_tx_hex", Bool),
        field("get_tx_metadata", Bool),
    ],
};

pub const SWEEP_ALL: ParamSchema = ParamSchema {
    operation: "sweep_all",
    fields: SWEEP_FIELDS,
};

pub const SWEEP_SINGLE: ParamSchema = ParamSchema {
    operation: "sweep_single",
    fields: SWEEP_FIELDS,
};

pub const GET_TRANSFERS: ParamSchema = ParamSchema {
    operation: "get_transfers",
    fields: &[
        field("in", Bool),
        field("out", Bool),
        field("pending", Bool),
        field("failed", Bool),
        field("pool", Bool),
        field("filter_by_height", Bool),
        field("min_height", UInt),
        field("max_height", UInt),
        field("account_index", UInt),
        field("subaddr_indices", UIntList),
    ],
};

pub const MAKE_URI: ParamSchema = ParamSchema {
    operation: "make_uri",
    fields: &[
        field("amount", UInt),
        field("payment_id", Str),
        field("recipient_name", Str),
        field("tx_description", Str),
    ],
};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("test fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn unknown_key_is_named_with_allowed_set() {
        let err = check_allowed_keys(&["a", "b"], &map(json!({"c": 1}))).expect_err("must fail");
        match err {
            ParamError::ParamNotSupported { key, allowed } => {
                assert_eq!(key, "c");
                assert_eq!(allowed, vec!["a", "b"]);
            }
            other => panic!("expected ParamNotSupported, got {other:?}"),
        }
    }

    #[test]
    fn allowed_keys_and_empty_input_pass() {
        assert!(check_allowed_keys(&["a", "b"], &map(json!({"a": 1, "b": 2}))).is_ok());
        assert!(check_allowed_keys(&["a"], &Map::new()).is_ok());
        assert!(check_allowed_keys(&[], &Map::new()).is_ok());
    }

    #[test]
    fn schema_rejects_unsupported_key() {
        let err = TRANSFER
            .check(&map(json!({"get_tx_key": true, "new_algorithm": true})))
            .expect_err("transfer does not take new_algorithm");
        assert!(matches!(err, ParamError::ParamNotSupported { ref key, .. } if key == "new_algorithm"));

        assert!(TRANSFER_SPLIT
            .check(&map(json!({"new_algorithm": true})))
            .is_ok());
    }

    #[test]
    fn schema_rejects_wrong_value_type() {
        let err = GET_TRANSFERS
            .check(&map(json!({"in": "yes"})))
            .expect_err("in must be boolean");
        assert_eq!(
            err.to_string(),
            "invalid argument: `get_transfers`: parameter `in` must be a boolean, got string"
        );

        let err = SWEEP_ALL
            .check(&map(json!({"subaddr_indices": [0, -1]})))
            .expect_err("indices must be unsigned");
        assert!(matches!(err, ParamError::InvalidArgument(ref m) if m.contains("subaddr_indices")));
    }

    #[test]
    fn schema_accepts_every_declared_field() {
        let supplied = map(json!({
            "in": true, "out": true, "pending": false, "failed": false, "pool": true,
            "filter_by_height": true, "min_height": 10, "max_height": 20,
            "account_index": 0, "subaddr_indices": [0, 1]
        }));
        assert!(GET_TRANSFERS.check(&supplied).is_ok());
    }

    #[test]
    fn merge_into_overrides_base_values() {
        let mut params = map(json!({"get_tx_key": true, "mixin": 20}));
        TRANSFER
            .merge_into(&mut params, map(json!({"get_tx_key": false, "ring_size": 11})))
            .expect("valid extras");
        assert_eq!(
            Value::Object(params),
            json!({"get_tx_key": false, "mixin": 20, "ring_size": 11})
        );
    }

    #[test]
    fn merge_into_leaves_params_untouched_on_error() {
        let mut params = map(json!({"mixin": 20}));
        assert!(MAKE_URI
            .merge_into(&mut params, map(json!({"bogus": 1})))
            .is_err());
        assert_eq!(Value::Object(params), json!({"mixin": 20}));
    }
}
