use aminovec_canonical::{Record, ToValue, Value};
use serde::Serialize;

use crate::pubkey::PubKey;

/// Per-validator leaf of the validator set hash.
///
/// Fields: `1 pub_key` (interface, never omitted), `2 voting_power`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorHashInput {
    /// Validator public key.
    pub pub_key: PubKey,
    /// Voting power.
    pub voting_power: i64,
}

impl ToValue for ValidatorHashInput {
    fn to_value(&self) -> Value {
        Record::new("ValidatorHashInput")
            .field(1, "pub_key", self.pub_key.to_value())
            .field(2, "voting_power", Value::Int(self.voting_power))
            .into()
    }
}
