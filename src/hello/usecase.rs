#![forbid(unsafe_code)]

use serde::Serialize;

use crate::hello::store::HelloStore;
use crate::utils::db_types::HelloInput;
use crate::utils::errors::StoreError;

// ***************************************************************************
//                              Use Case Types
// ***************************************************************************
/// Result of one greeting invocation.  The record's creation timestamp is
/// persisted but deliberately not part of this contract.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GreetingReply {
    pub id: i32,
    pub name: Option<String>,
    pub message: String,
}

// ***************************************************************************
//                               Use Case
// ***************************************************************************
/// The greeting use case.  Stateless orchestration: derive the message,
/// persist exactly one record through the store handed in at construction,
/// and return the persisted id/name/message.  Store failures propagate
/// unchanged; there are no retries.
pub struct GreetingUseCase<S: HelloStore> {
    store: S,
}

impl<S: HelloStore> GreetingUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // -----------------------------------------------------------------------
    // execute:
    // -----------------------------------------------------------------------
    /** Compute the greeting for an optional name and persist it.  Each call
     * creates a new distinct record, even with identical input.  No length
     * validation happens here; an over-long name is rejected by the store's
     * column constraint.
     */
    pub async fn execute(&self, name: Option<String>) -> Result<GreetingReply, StoreError> {
        let message = greeting_message(name.as_deref());
        let hello = self.store.create(HelloInput::new(name, message)).await?;
        Ok(GreetingReply { id: hello.id, name: hello.name, message: hello.message })
    }
}

// ---------------------------------------------------------------------------
// greeting_message:
// ---------------------------------------------------------------------------
/** Derive the greeting text.  The wording is fixed English with no
 * trimming, escaping, or localization of the name.
 */
pub fn greeting_message(name: Option<&str>) -> String {
    format!("Hello {}!", name.unwrap_or("World"))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use crate::hello::store::HelloStore;
    use crate::utils::db_types::Hello;
    use crate::utils::web_utils::timestamp_utc;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // In-memory stand-in for the Postgres store.  Ids are assigned
    // monotonically from 1 and the varchar(100) bound on name is enforced
    // the same way the real column does.
    #[derive(Clone, Default)]
    struct MemHelloStore {
        rows: Arc<Mutex<Vec<Hello>>>,
    }

    #[async_trait]
    impl HelloStore for MemHelloStore {
        async fn create(&self, input: HelloInput) -> Result<Hello, StoreError> {
            if let Some(name) = &input.name {
                if name.chars().count() > 100 {
                    return Err(StoreError::ConstraintViolation(
                        "value too long for type character varying(100)".to_string(),
                    ));
                }
            }
            if input.message.is_empty() {
                return Err(StoreError::ConstraintViolation(
                    "null value in column \"message\"".to_string(),
                ));
            }

            let mut rows = self.rows.lock().unwrap();
            let hello = Hello {
                id: rows.len() as i32 + 1,
                name: input.name,
                message: input.message,
                created: timestamp_utc(),
            };
            rows.push(hello.clone());
            Ok(hello)
        }

        async fn get(&self, id: i32) -> Result<Option<Hello>, StoreError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|h| h.id == id).cloned())
        }
    }

    fn new_usecase() -> (GreetingUseCase<MemHelloStore>, MemHelloStore) {
        let store = MemHelloStore::default();
        (GreetingUseCase::new(store.clone()), store)
    }

    #[test]
    fn message_derivation() {
        assert_eq!(greeting_message(None), "Hello World!");
        assert_eq!(greeting_message(Some("Alice")), "Hello Alice!");
        // An empty string is a present name, not an absent one.
        assert_eq!(greeting_message(Some("")), "Hello !");
    }

    #[tokio::test]
    async fn absent_name_greets_the_world() {
        let (usecase, _) = new_usecase();
        let reply = usecase.execute(None).await.expect("execute");
        assert_eq!(reply.id, 1);
        assert_eq!(reply.name, None);
        assert_eq!(reply.message, "Hello World!");
    }

    #[tokio::test]
    async fn present_name_is_echoed() {
        let (usecase, _) = new_usecase();
        usecase.execute(None).await.expect("first execute");
        let reply = usecase.execute(Some("Alice".to_string())).await.expect("second execute");
        assert_eq!(reply.id, 2);
        assert_eq!(reply.name.as_deref(), Some("Alice"));
        assert_eq!(reply.message, "Hello Alice!");
    }

    #[tokio::test]
    async fn repeated_input_creates_distinct_records() {
        let (usecase, _) = new_usecase();
        let first = usecase.execute(Some("Bob".to_string())).await.expect("first");
        let second = usecase.execute(Some("Bob".to_string())).await.expect("second");
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, second.name);
        assert_eq!(first.message, second.message);
    }

    #[tokio::test]
    async fn created_record_round_trips() {
        let (usecase, store) = new_usecase();
        let reply = usecase.execute(Some("Alice".to_string())).await.expect("execute");
        let fetched = store.get(reply.id).await.expect("get").expect("record exists");
        assert_eq!(fetched.name, reply.name);
        assert_eq!(fetched.message, reply.message);
    }

    #[tokio::test]
    async fn name_length_boundary() {
        let (usecase, _) = new_usecase();

        let name_100 = "x".repeat(100);
        let reply = usecase.execute(Some(name_100.clone())).await.expect("100 chars fit");
        assert_eq!(reply.message, format!("Hello {}!", name_100));

        let name_101 = "x".repeat(101);
        let err = usecase.execute(Some(name_101)).await.expect_err("101 chars rejected");
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn absent_name_serializes_as_null() {
        let (usecase, _) = new_usecase();
        let reply = usecase.execute(None).await.expect("execute");
        let json = serde_json::to_value(&reply).expect("serialize");
        assert_eq!(json["name"], serde_json::Value::Null);
        assert_eq!(json["message"], "Hello World!");
    }
}
