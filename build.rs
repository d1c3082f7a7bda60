use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // A directory path makes cargo rescan every file under it, so new or
    // edited migrations re-embed via sqlx::migrate!.
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-env-changed=SIGEA_BUILD_ID");

    // Surfaced by /health. CI can pin it (a commit sha); local builds get
    // the build's unix time.
    let build_id = env::var("SIGEA_BUILD_ID").unwrap_or_else(|_| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs().to_string())
            .unwrap_or_else(|_| "dev".to_string())
    });
    println!("cargo:rustc-env=SIGEA_BUILD_ID={build_id}");
}
