#![forbid(unsafe_code)]

use poem_openapi::Object;
use thiserror::Error;

/// Errors enumerates the setup and configuration errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("hello_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Inaccessible logger configuration file.
    #[error("Unable to access the Log4rs configuration file: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),
}

/// StoreError is the record store's failure taxonomy.  Both variants
/// propagate unchanged through the greeting use case; the HTTP layer
/// decides what status each one maps to.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database cannot be reached or the driver failed outside of
    /// any data constraint.
    #[error("storage unavailable: {}", .0)]
    Unavailable(String),

    /// A column constraint rejected the data, e.g. a name longer than
    /// 100 characters or a null message.
    #[error("constraint violation: {}", .0)]
    ConstraintViolation(String),
}

// ***************************************************************************
//                               HTTP Results
// ***************************************************************************
// Generic body returned on non-200 responses.
#[derive(Object, Debug)]
pub struct HttpResult {
    pub result_code: String,
    pub result_msg: String,
}

impl HttpResult {
    pub fn new(result_code: String, result_msg: String) -> Self {
        Self { result_code, result_msg }
    }
}
