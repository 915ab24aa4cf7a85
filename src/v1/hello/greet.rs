#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{param::Query, payload::Json, ApiResponse, Object, OpenApi};

use log::{error, info};

use crate::hello::store::PgHelloStore;
use crate::hello::usecase::GreetingUseCase;
use crate::utils::errors::{HttpResult, StoreError};
use crate::utils::web_utils::{self, RequestDebug};

use crate::RUNTIME_CTX;

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct GreetApi;

#[derive(Object, Debug)]
pub struct RespGreeting {
    id: i32,
    name: Option<String>,
    message: String,
}

// Internal view of the inbound query for debug logging.
struct ReqGreeting {
    name: Option<String>,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGreeting {
    type Req = ReqGreeting;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request query:");
        s.push_str("\n    name: ");
        match &self.name {
            Some(name) => s.push_str(name),
            None => s.push_str("<absent>"),
        }
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum HelloResponse {
    #[oai(status = 200)]
    Http200(Json<RespGreeting>),
    #[oai(status = 400)]
    Http400(Json<HttpResult>),
    #[oai(status = 500)]
    Http500(Json<HttpResult>),
}

fn make_http_200(resp: RespGreeting) -> HelloResponse {
    HelloResponse::Http200(Json(resp))
}
fn make_http_400(msg: String) -> HelloResponse {
    HelloResponse::Http400(Json(HttpResult::new(400.to_string(), msg)))
}
fn make_http_500(msg: String) -> HelloResponse {
    HelloResponse::Http500(Json(HttpResult::new(500.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GreetApi {
    #[oai(path = "/hello", method = "get")]
    async fn get_hello(&self, http_req: &Request, name: Query<Option<String>>) -> HelloResponse {
        // The name is passed through verbatim: no trimming, no case
        // normalization.  An empty string is a present name.
        let req = ReqGreeting { name: name.0 };

        // Conditional logging depending on log level.
        web_utils::debug_request(http_req, &req);

        // Wire the use case explicitly; cloning the pool handle is cheap.
        let usecase = GreetingUseCase::new(PgHelloStore::new(RUNTIME_CTX.db.clone()));

        // -------------------- Process Request ----------------------
        match usecase.execute(req.name).await {
            Ok(reply) => {
                info!("Greeting record {} created.", reply.id);
                make_http_200(RespGreeting {
                    id: reply.id,
                    name: reply.name,
                    message: reply.message,
                })
            }
            Err(e @ StoreError::ConstraintViolation(_)) => {
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                error!("{}", msg);
                make_http_400(msg)
            }
            Err(e @ StoreError::Unavailable(_)) => {
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                error!("{}", msg);
                make_http_500(msg)
            }
        }
    }
}
