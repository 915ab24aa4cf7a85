// This file contains the hello server database structs and related definitions.
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// hellos:
// ---------------------------------------------------------------------------
/// A persisted greeting record.  The id and created fields are assigned by
/// the store at insertion time and are immutable thereafter.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Hello {
    pub id: i32,
    pub name: Option<String>,
    pub message: String,
    pub created: DateTime<Utc>,
}

/// Caller-supplied portion of a greeting record.  An absent name is
/// distinct from an empty string.
#[derive(Debug, Deserialize, Clone)]
pub struct HelloInput {
    pub name: Option<String>,
    pub message: String,
}

impl Hello {
    #[allow(dead_code)]
    pub fn new(id: i32, name: Option<String>, message: String, created: DateTime<Utc>) -> Hello {
        Hello { id, name, message, created }
    }
}

impl HelloInput {
    pub fn new(name: Option<String>, message: String) -> HelloInput {
        HelloInput { name, message }
    }
}
