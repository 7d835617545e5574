use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

/// Fingerprint of a buffer, used to skip re-analysis when an edit leaves the text as it was.
pub(crate) fn compute_content_hash(content: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    content.hash(&mut hasher);
    hasher.finish()
}
