//! Hygiene — enforces coding standards at test time
//!
//! Scans the client crate's production sources. On top of the panic and
//! silent-loss budgets shared with `layout`, the browser glue budgets the
//! closures and timers it leaks on purpose: each one must stay tied to a
//! listener or timer that lives as long as the page.
#![allow(clippy::absurd_extreme_comparisons)]

#[path = "../../layout/tests/support/scan.rs"]
mod scan;

use scan::{assert_budget, source_files};

// Panics — these would take the page's scripts down.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Silent loss — discards errors without inspecting.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Leaks — listener closures, the DOMContentLoaded hook, scheduled timers.
const MAX_FORGET: usize = 3;

// Style / structure.
const MAX_ALLOW_DEAD_CODE: usize = 0;

#[test]
fn sources_are_found() {
    assert!(!source_files().is_empty(), "run from the crate root");
}

#[test]
fn panic_budgets() {
    let files = source_files();
    assert_budget(&files, ".unwrap()", MAX_UNWRAP);
    assert_budget(&files, ".expect(", MAX_EXPECT);
    assert_budget(&files, "panic!(", MAX_PANIC);
    assert_budget(&files, "unreachable!(", MAX_UNREACHABLE);
    assert_budget(&files, "todo!(", MAX_TODO);
    assert_budget(&files, "unimplemented!(", MAX_UNIMPLEMENTED);
}

#[test]
fn silent_discard_budgets() {
    let files = source_files();
    assert_budget(&files, "let _ =", MAX_SILENT_DISCARD);
    assert_budget(&files, ".ok()", MAX_DOT_OK);
}

#[test]
fn forget_budget() {
    assert_budget(&source_files(), ".forget()", MAX_FORGET);
}

#[test]
fn allow_dead_code_budget() {
    assert_budget(&source_files(), "#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}
