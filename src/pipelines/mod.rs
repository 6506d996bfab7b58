//! Streaming extraction pipelines, one per record kind, grounded on the
//! `diffhouse.pipelines.*` package. Each pipeline pairs a `log_*` step
//! (build the `git` invocation and hand back a raw byte stream) with a
//! `parse_*` step (cut the stream into records and decode each one),
//! mirroring the two-stage shape the original keeps throughout.

pub mod commit;
pub mod diff;
pub mod filemod;
pub mod refs;

/// Separates commits (or other top-level records) within a single log
/// stream. Chosen, like the original, from the ASCII ancillary range so it
/// cannot appear in any path, message, or diff content `git` would emit.
pub(crate) const RECORD_SEPARATOR: u8 = 0x1e;

/// Separates fields within one record.
pub(crate) const UNIT_SEPARATOR: u8 = 0x1f;

/// A record that failed to parse. Every pipeline logs these and continues
/// with the next record rather than aborting the whole stream — one bad
/// commit must not take down extraction of the other ten thousand.
pub(crate) fn warn_skipped(kind: &str, record: &str, reason: impl std::fmt::Display) {
    log::warn!("Skipping malformed {kind} record ({reason}): {record:?}");
}
