//! Cooperative control cells shared between a long-running computation and its host.
//!
//! The computation never owns synchronization: it only polls a [CancelCell] and writes a
//! [ProgressCell]. Cross-thread sharing (typically via `Arc`) is the caller's business.
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A one-way cancellation flag. Once raised it stays raised.
#[derive(Debug, Default)]
pub struct CancelCell {
    flag: AtomicBool,
}

impl CancelCell {
    /// Creates a cell with the flag lowered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag. A computation polling this cell aborts at its next check.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns whether the flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A progress gauge holding a fraction in `[0, 1]`.
///
/// Stored as the bit pattern of an `f64`, so reads and writes are atomic without a lock.
#[derive(Debug, Default)]
pub struct ProgressCell {
    bits: AtomicU64,
}

impl ProgressCell {
    /// Creates a cell at progress 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the stored fraction.
    pub fn set(&self, fraction: f64) {
        self.bits.store(fraction.to_bits(), Ordering::Relaxed);
    }

    /// Returns the last stored fraction.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Borrowed bundle of the two optional control cells a computation accepts.
///
/// Either cell may be absent, in which case the corresponding check or update is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Control<'a> {
    cancel: Option<&'a CancelCell>,
    progress: Option<&'a ProgressCell>,
}

impl<'a> Control<'a> {
    /// Creates a bundle from the given cells.
    pub fn new(cancel: Option<&'a CancelCell>, progress: Option<&'a ProgressCell>) -> Self {
        Self { cancel, progress }
    }

    /// A bundle with neither cell, for callers that want to run uninterrupted.
    pub fn none() -> Self {
        Self::default()
    }

    /// Polls the cancellation flag, if one was supplied.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.map_or(false, CancelCell::is_cancelled)
    }

    /// Writes the progress fraction, if a gauge was supplied.
    pub fn set_progress(&self, fraction: f64) {
        if let Some(cell) = self.progress {
            cell.set(fraction);
        }
    }
}
