#![forbid(unsafe_code)]

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::{error, info, LevelFilter};
use serde::Deserialize;
use std::{env, fs, path::Path};
use structopt::StructOpt;
use toml;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as Log4rsConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

use futures::executor::block_on;
use sqlx::{Pool, Postgres};

// Hello server utilities
use crate::utils::web_utils::get_absolute_path;
use crate::utils::{db_init, errors::Errors};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Configuration file locations.
const ENV_CONFIG_FILE: &str = "HELLO_SERVER_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "~/.hello_server/hello.toml";
const DEFAULT_LOG4RS_CONFIG_FILE: &str = "~/.hello_server/log4rs.yml";

// Networking.
const DEFAULT_HTTP_ADDR: &str = "http://localhost";
const DEFAULT_HTTP_PORT: u16 = 3000;

// Database defaults suitable for local development.
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "hellos";
const DEFAULT_DB_MIGRATIONS_DIR: &str = "migrations";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref HELLO_ARGS: HelloArgs = init_hello_args();
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// CommandLineArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "hello_server", about = "Command line arguments for the hello server.")]
pub struct HelloArgs {
    /// Path to the TOML configuration file.
    ///
    /// The configuration file is located using the following priority order:
    ///
    ///   1. If set, the value of the HELLO_SERVER_CONFIG environment variable,
    ///
    ///   2. Otherwise, if set, the value of this --config-file argument,
    ///
    ///   3. Otherwise, ~/.hello_server/hello.toml
    ///
    /// If no file is found at the resolved path, built-in defaults are used.
    #[structopt(short, long)]
    pub config_file: Option<String>,

    /// Insert the Alice and Bob sample greeting records at startup.
    #[structopt(short, long)]
    pub seed: bool,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub db: Pool<Postgres>,
    pub hello_args: &'static HelloArgs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
// Missing fields in the TOML file fall back to their default values.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_migrations_dir: String,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: DEFAULT_DB_PORT,
            db_user: DEFAULT_DB_USER.to_string(),
            db_password: DEFAULT_DB_PASSWORD.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
            db_migrations_dir: DEFAULT_DB_MIGRATIONS_DIR.to_string(),
        }
    }
}

// ***************************************************************************
//                            Argument Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_hello_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_hello_args() -> HelloArgs {
    let args = HelloArgs::from_args();
    println!("{:?}", args);
    args
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
pub fn init_log() {
    // Initialize log4rs logging from the yaml file if one exists.
    let logconfig = get_absolute_path(DEFAULT_LOG4RS_CONFIG_FILE);
    if Path::new(&logconfig).is_file() {
        match log4rs::init_file(logconfig.clone(), Default::default()) {
            Ok(_) => {
                info!("Log4rs initialized using: {}", logconfig);
                return;
            }
            Err(e) => {
                println!("{}", e);
                let s = format!("{}", Errors::Log4rsInitialization(logconfig));
                panic!("{}", s);
            }
        }
    }

    // No file-based log configuration, write to the console.
    init_console_log();
    info!("Log4rs initialized with console defaults, no file found at: {}", logconfig);
}

// ---------------------------------------------------------------------------
// init_console_log:
// ---------------------------------------------------------------------------
fn init_console_log() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%dT%H:%M:%S%.6fZ)(utc)} {l} {t} - {m}{n}",
        )))
        .build();
    let config = Log4rsConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .expect("Unable to build the console log configuration.");
    log4rs::init_config(config).expect("Unable to initialize console logging.");
}

/// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file specified
 * either through an environment variable or as a command line argument.  If
 * neither are provided, an attempt is made to use the default file path.
 */
fn get_parms() -> Result<Parms> {
    // Resolve the config file path.
    let config_file = env::var(ENV_CONFIG_FILE).unwrap_or_else(|_| {
        match HELLO_ARGS.config_file.clone() {
            Some(f) => f,
            None => DEFAULT_CONFIG_FILE.to_string(),
        }
    });

    // Read the configuration file.
    let config_file_abs = get_absolute_path(&config_file);
    info!("{}", Errors::ReadingConfigFile(config_file_abs.clone()));
    let contents = match fs::read_to_string(&config_file_abs) {
        Ok(c) => c,
        Err(_) => {
            println!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config: Config = match toml::from_str(&contents) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file_abs), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file: config_file_abs, config })
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If either of these fail the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    let db = block_on(db_init::init_db(&parms.config));
    RuntimeCtx { parms, db, hello_args: &HELLO_ARGS }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::utils::config::Config;

    #[test]
    fn default_config_values() {
        let config = Config::new();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.db_user, "postgres");
        assert_eq!(config.db_password, "postgres");
        assert_eq!(config.db_name, "hellos");
        assert_eq!(config.db_migrations_dir, "migrations");
    }

    #[test]
    fn toml_overrides_defaults() {
        let toml_str = r#"
            title = "Hello Server Test"
            http_port = 8080
            db_host = "db.example.com"
            db_name = "hellos_test"
        "#;
        let config: Config = toml::from_str(toml_str).expect("toml parse");
        assert_eq!(config.title, "Hello Server Test");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.db_host, "db.example.com");
        assert_eq!(config.db_name, "hellos_test");
        // Unspecified fields keep their defaults.
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.db_user, "postgres");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").expect("toml parse");
        assert_eq!(config.http_addr, "http://localhost");
        assert_eq!(config.http_port, 3000);
    }
}
