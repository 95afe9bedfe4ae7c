//! Note body markup helpers.
//!
//! # Responsibility
//! - Parse the inline `[copy:...]` convention used in note bodies.
//! - Normalize note text for case/diacritic-insensitive search.
//!
//! # Invariants
//! - Parsing is total: malformed markup is left as plain text, never an error.
//! - Display text and extracted spans come from the same parse pass.

pub mod copy;
pub mod search;

pub use copy::{
    clean_display_text, extract_copyable_spans, truncate_label, CopyableSpan, CopyableSpans,
    COPY_LABEL_MAX_CHARS,
};
pub use search::{matches_query, normalize_for_search};
