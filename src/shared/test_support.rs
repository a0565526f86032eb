//! Usage: Test-only helpers (unique temp directories).

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TMP_DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn unique_tmp_dir(label: &str) -> PathBuf {
    let seq = TMP_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "store_migrate_{label}_test_{nanos}_{}_{}",
        std::process::id(),
        seq
    ));
    std::fs::create_dir_all(&dir).expect("create tmp dir");
    dir
}

#[test]
fn unique_tmp_dir_is_unique_across_calls() {
    let a = unique_tmp_dir("seq");
    let b = unique_tmp_dir("seq");
    assert_ne!(a, b);
    let _ = std::fs::remove_dir_all(&a);
    let _ = std::fs::remove_dir_all(&b);
}
