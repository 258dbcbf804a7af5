//! The Big IDEA:
//! Idea is very simple, an application that can run as several
//! independent instances at once still has exactly one settings file.
//! If instance A saves its window layout while instance B saves its
//! session list, neither save is allowed to wipe out the other one.
//! The usual bug is that each instance keeps an in-memory copy of the
//! whole file and writes that copy back, clobbering whatever the other
//! instance wrote in the meantime. This crate avoids the bug by never
//! trusting an in-memory copy across a write: every write takes a
//! system-wide lock, re-reads the file fresh, merges in exactly one
//! named section, and writes the result back.

// The `pub mod core;` declaration exposes the `core` module.
//
// `core` module:
// This module holds the load/merge/save protocol itself. It defines the
// in-memory form of the settings document (`SettingsDocument` and
// `Section`), the `SettingsStore` that performs every read-modify-write
// cycle under the cross-process lock, the `SettingsProvider` trait for
// abstracting store access, and the build-identity version stamp that is
// rewritten onto the document on every save.
pub mod core;

// The `pub mod sync;` declaration exposes the `sync` module.
//
// `sync` module:
// This module contains the cross-process mutual-exclusion machinery. It
// wraps an advisory file lock in an RAII `LockGuard` so that every
// read-modify-write cycle against the settings file is serialized across
// threads and across independent processes, and the lock is released on
// every exit path.
pub mod sync;

// The `pub mod utils;` declaration exposes the `utils` module.
//
// `utils` module:
// This module implements the command handlers behind the CLI binary:
// listing sections, printing a section in a chosen format, setting a
// single key, removing a section, and reporting the version stamp. The
// handlers only drive the public store surface; none of the store's
// semantics live here.
pub mod utils;
