use std::fmt;

use serde::{Deserialize, Serialize};

/// A person as read from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonIn {
    pub first_name: String,
    pub last_name: String,
}

/// A person as written to the `people` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonOut {
    pub first_name: String,
    pub last_name: String,
}

impl PersonOut {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl fmt::Display for PersonIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "firstName: {}, lastName: {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for PersonOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "firstName: {}, lastName: {}", self.first_name, self.last_name)
    }
}
