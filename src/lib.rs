//! tag-tally: a single-threaded hashtag frequency counter built on a
//! chained-bucket hash table that also threads every distinct tag
//! through an insertion-ordered doubly linked list.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: count `#tag` occurrences in a text stream and keep a bounded
//!   leaderboard of the most frequent tags, while preserving a second
//!   ordering of all distinct tags by first insertion, walkable from
//!   either end.
//! - Layers:
//!   - `TagTable`: the core. A fixed array of bucket chains selected by
//!     a polynomial digest, plus head/tail cursors for the insertion
//!     order list. Entries live in a slotmap arena; chain and order
//!     links are slotmap keys, so both structures share one allocation
//!     site and unlinking never touches raw pointers.
//!   - `TagScanner`: tokenizer collaborator. Streams bytes, yields
//!     lower-cased tags found after `#`.
//!   - `Leaderboard`: top-K collaborator. Consumes `(tag, new_count)`
//!     pairs from each `put` and keeps the K best slots sorted.
//!   - `tagtop` binary: thin driver wiring file -> scanner -> table ->
//!     leaderboard, with a diagnostic dump of the insertion order.
//!
//! Constraints
//! - Single-threaded: exclusive access to a table for its lifetime; no
//!   locking, no atomics.
//! - Fixed bucket count (100); no resizing or rehashing. This is a
//!   documented simplification, not a performance target.
//! - Keys are text, values are occurrence counts; no generic K/V.
//!
//! Why the arena?
//! - The two structures (chains and order list) reference the same
//!   entries. Generational slotmap keys give stable O(1) addressing for
//!   both without `Rc`/`RefCell` or unsafe pointer surgery, and freeing
//!   a slot exactly once makes dangling links structurally impossible.
//!
//! Invariants
//! - A live entry is in exactly one bucket chain and exactly one order
//!   list position.
//! - `head`/`tail` are `None` iff the table is empty.
//! - Chain and order traversals terminate and visit each live entry
//!   exactly once.
//! - Failed operations (e.g. removing an absent tag) leave the table
//!   untouched.
//!
//! Non-goals
//! - No concurrency, no persistence, no load-factor growth policy.
//! - The leaderboard is streaming: a tag enters it only once its
//!   running count beats the current floor.

mod hash;
mod leaderboard;
mod scanner;
mod tag_table;
mod tag_table_proptest;

// Public surface
pub use hash::tag_digest;
pub use leaderboard::Leaderboard;
pub use scanner::TagScanner;
pub use tag_table::{OrderedIter, RemoveError, TagTable, BUCKET_COUNT};
