// This file contains all SQL statements issued by the hello server.
#![forbid(unsafe_code)]

// ========================= hellos table =========================
// The id and createdAt columns are always assigned by the database,
// never bound by the caller.
pub const INSERT_HELLO: &str = concat!(
    "INSERT INTO hellos (name, message) ",
    "VALUES ($1, $2) ",
    "RETURNING id, name, message, \"createdAt\"",
);

pub const GET_HELLO_BY_ID: &str = concat!(
    "SELECT id, name, message, \"createdAt\" ",
    "FROM hellos WHERE id = $1",
);

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_target_hellos_table() {
        assert!(INSERT_HELLO.contains("INSERT INTO hellos"));
        assert!(INSERT_HELLO.contains("RETURNING id"));
        assert!(GET_HELLO_BY_ID.contains("FROM hellos WHERE id = $1"));
    }
}
