#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use log::info;
use poem::{listener::TcpListener, Route};
use poem_openapi::OpenApiService;

// Hello server utilities
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx};
use crate::utils::db;
use crate::utils::errors::Errors;
use crate::v1::hello::greet::GreetApi;
use crate::v1::hello::version::VersionApi;

// Modules
mod hello;
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME: &str = "HelloServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that it has a 'static lifetime.
// We also initialize the database connection pool and run db migrations.
// We exit if we can't read our parameters or access the database.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting hello_server!");

    // Initialize the server.
    server_init();

    // --------------- Main Loop Set Up ---------------
    // Assign base URL.
    let base_url = format!("{}:{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port);

    // Register the greeting and version endpoints.
    let endpoints = (GreetApi, VersionApi);
    let api_service = OpenApiService::new(
            endpoints,
            RUNTIME_CTX.parms.config.title.clone(),
            option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
        )
        .server(base_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();

    // Create the routes and run the server.
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/doc", ui)
        .nest("/", api_service);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// server_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems and data structures other than those needed
 * to configure the main loop processor.
 */
fn server_init() {
    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of runtime context.
    // The runtime context also initializes the database, which makes db connections
    // available to all modules.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    print_version_info();

    // Insert sample records when --seed is specified.
    db::check_seed_data();
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running hello_server={}, BUILD_TS={}, RUSTC={}",
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        env!("BUILD_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}
