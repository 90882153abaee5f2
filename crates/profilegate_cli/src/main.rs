//! CLI smoke entry point.
//!
//! Prints core linkage info and the effective defaults the UI hosts start
//! from, without touching the network or the persisted store.

use profilegate_core::{core_version, ping, CoreConfig, BANNER_DURATION_MS, PAGE_SIZE};

fn main() {
    let config = CoreConfig::default();
    println!("profilegate_core ping={}", ping());
    println!("profilegate_core version={}", core_version());
    println!("profilegate_core records_url={}", config.records_url);
    println!("profilegate_core page_size={PAGE_SIZE} banner_ms={BANNER_DURATION_MS}");
}
