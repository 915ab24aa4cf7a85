#![forbid(unsafe_code)]

use anyhow::Result;
use futures::executor::block_on;
use log::{info, warn};

use crate::hello::store::PgHelloStore;
use crate::hello::usecase::GreetingUseCase;
use crate::utils::config::HELLO_ARGS;
use crate::utils::web_utils::{timestamp_utc, timestamp_utc_to_str};
use crate::RUNTIME_CTX;

// Sample records inserted when the --seed option is specified.
const SEED_NAMES: [&str; 2] = ["Alice", "Bob"];

// ---------------------------------------------------------------------------
// check_seed_data:
// ---------------------------------------------------------------------------
/** Insert the development sample records when the --seed option is
 * specified.  It's a no-op during regular execution.  Seeding is a
 * convenience only, so failures are logged and otherwise ignored.
 */
pub fn check_seed_data() {
    // Guard against seeding during regular execution.
    if !HELLO_ARGS.seed {
        return;
    }

    match block_on(seed_dev_records()) {
        Ok(n) => {
            info!("{} seed records inserted at {}.", n, timestamp_utc_to_str(timestamp_utc()));
        }
        Err(e) => {
            warn!("****** Ignoring error while inserting seed records: {}", e);
        }
    };
}

// ---------------------------------------------------------------------------
// seed_dev_records:
// ---------------------------------------------------------------------------
/** Run the sample names through the greeting use case so that the stored
 * messages obey the same derivation rule as live requests.
 */
async fn seed_dev_records() -> Result<u64> {
    let usecase = GreetingUseCase::new(PgHelloStore::new(RUNTIME_CTX.db.clone()));

    let mut inserted: u64 = 0;
    for name in SEED_NAMES {
        let reply = usecase.execute(Some(name.to_string())).await?;
        info!("Seed record {} created for '{}'.", reply.id, name);
        inserted += 1;
    }

    Ok(inserted)
}
