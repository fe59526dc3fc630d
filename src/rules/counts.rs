use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single observed action: how many times it happened, or whether it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionValue {
    Flag(bool),
    Count(i64),
}

impl ActionValue {
    /// Multiplier applied to the action's point value. Booleans weigh 0 or 1.
    #[must_use]
    pub fn weight(self) -> u64 {
        match self {
            Self::Flag(done) => u64::from(done),
            Self::Count(n) => n.max(0) as u64,
        }
    }
}

impl From<bool> for ActionValue {
    fn from(done: bool) -> Self {
        Self::Flag(done)
    }
}

impl From<i64> for ActionValue {
    fn from(n: i64) -> Self {
        Self::Count(n)
    }
}

impl From<i32> for ActionValue {
    fn from(n: i32) -> Self {
        Self::Count(i64::from(n))
    }
}

impl From<u32> for ActionValue {
    fn from(n: u32) -> Self {
        Self::Count(i64::from(n))
    }
}

/// Raw action observations for one phase, keyed by action name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionCounts(BTreeMap<String, ActionValue>);

impl ActionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, action: impl Into<String>, value: impl Into<ActionValue>) -> Self {
        self.set(action, value);
        self
    }

    pub fn set(&mut self, action: impl Into<String>, value: impl Into<ActionValue>) {
        self.0.insert(action.into(), value.into());
    }

    pub fn get(&self, action: &str) -> Option<ActionValue> {
        self.0.get(action).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ActionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rejects negative counts. Scoring assumes this has passed.
    pub fn validate(&self) -> Result<()> {
        for (action, value) in &self.0 {
            if let ActionValue::Count(n) = value {
                if *n < 0 {
                    return Err(Error::Validation(format!(
                        "count for '{action}' cannot be negative ({n})"
                    )));
                }
            }
        }
        Ok(())
    }
}
