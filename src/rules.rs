//! Rule sets. Each family lives in its own module with the same layout:
//! `rules.rs` (rule constructors and `get`), `predicates.rs` (token tests),
//! `helpers.rs` (span finders) and `tests.rs`.

pub(crate) mod merge;
