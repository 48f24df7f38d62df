//! Process-wide counters for allocation and formula work.
//!
//! Counters use relaxed atomics: they are observational only and never feed
//! back into a transform result.

use std::sync::atomic::{AtomicUsize, Ordering};

static OUTPUT_BYTES: AtomicUsize = AtomicUsize::new(0);
static FORMULA_CALLS: AtomicUsize = AtomicUsize::new(0);

/// Point-in-time reading of both counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub copy_bytes: u64,
    pub evaluations: u64,
}

/// Bytes allocated for output containers.
pub(crate) fn record_copy_bytes(bytes: usize) {
    if bytes > 0 {
        OUTPUT_BYTES.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// Scalar formula invocations.
pub(crate) fn record_evaluations(count: usize) {
    if count > 0 {
        FORMULA_CALLS.fetch_add(count, Ordering::Relaxed);
    }
}

fn read(counter: &AtomicUsize) -> u64 {
    counter.load(Ordering::Relaxed) as u64
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        copy_bytes: read(&OUTPUT_BYTES),
        evaluations: read(&FORMULA_CALLS),
    }
}

pub fn copy_bytes_total() -> u64 {
    read(&OUTPUT_BYTES)
}

/// Returns the byte counter and zeroes it.
pub fn take_copy_bytes() -> u64 {
    OUTPUT_BYTES.swap(0, Ordering::Relaxed) as u64
}

pub fn reset_copy_bytes() {
    OUTPUT_BYTES.store(0, Ordering::Relaxed);
}

pub fn evaluations_total() -> u64 {
    read(&FORMULA_CALLS)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are shared with every other test in the binary, so only
    // lower bounds are asserted.
    #[test]
    fn recording_moves_counters_forward() {
        let before = snapshot();
        record_copy_bytes(16);
        record_evaluations(3);
        let after = snapshot();
        assert!(after.copy_bytes >= before.copy_bytes + 16);
        assert!(after.evaluations >= before.evaluations + 3);
        assert!(evaluations_total() >= after.evaluations);
    }
}
