//! TagTable: chained-bucket hash table threaded by an insertion-order list.
//!
//! Entries live in a slotmap arena; the bucket array stores the key of
//! each chain head, entries store their next-in-chain key, and the order
//! list stores prev/next keys plus head/tail cursors on the table. Both
//! structures are views over the same arena slot, so an entry is freed
//! exactly once no matter which view it was reached through.

use slotmap::SlotMap;
use thiserror::Error;

use crate::hash::tag_digest;

/// Number of bucket chains in a default table. Fixed; the table never
/// resizes or rehashes.
pub const BUCKET_COUNT: usize = 100;

slotmap::new_key_type! {
    struct EntryKey;
}

#[derive(Debug)]
struct Entry {
    tag: String,
    count: u64,
    /// Next entry in this entry's bucket chain. Chains are singly
    /// linked; deletion re-scans from the chain head.
    next_in_bucket: Option<EntryKey>,
    /// Neighbors in the global insertion-order list.
    prev_in_order: Option<EntryKey>,
    next_in_order: Option<EntryKey>,
}

/// Error returned by [`TagTable::remove`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RemoveError {
    #[error("tag not present in the table")]
    NotFound,
}

/// Occurrence counter for text tags.
///
/// `put` tallies a tag, `get` reads its count, `remove` forgets it, and
/// `iter` walks all distinct tags in first-insertion order from either
/// end. A table is single-threaded and exclusively owned for its whole
/// lifetime.
pub struct TagTable {
    buckets: Vec<Option<EntryKey>>,
    entries: SlotMap<EntryKey, Entry>,
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
}

impl TagTable {
    /// Create an empty table with [`BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(BUCKET_COUNT)
    }

    /// Create an empty table with a specific bucket count.
    ///
    /// Mainly useful in tests to force long chains (`with_buckets(1)`
    /// puts every tag in one chain). Panics if `buckets` is zero.
    pub fn with_buckets(buckets: usize) -> Self {
        assert!(buckets > 0, "bucket count must be non-zero");
        Self {
            buckets: vec![None; buckets],
            entries: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    /// Number of distinct tags currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bucket_for(&self, tag: &str) -> usize {
        (tag_digest(tag) % self.buckets.len() as u64) as usize
    }

    /// Single chain-scan primitive shared by `get`, `put` and `remove`:
    /// first exact match in the tag's bucket chain, if any.
    fn find_key(&self, tag: &str) -> Option<EntryKey> {
        let mut cursor = self.buckets[self.bucket_for(tag)];
        while let Some(k) = cursor {
            let entry = &self.entries[k];
            if entry.tag == tag {
                return Some(k);
            }
            cursor = entry.next_in_bucket;
        }
        None
    }

    /// Tally one occurrence of `tag` and return its updated count.
    ///
    /// A tag seen for the first time is linked at the head of its bucket
    /// chain and appended at the tail of the insertion-order list; its
    /// count starts at 1.
    pub fn put(&mut self, tag: &str) -> u64 {
        if let Some(k) = self.find_key(tag) {
            let entry = &mut self.entries[k];
            entry.count += 1;
            return entry.count;
        }

        let bucket = self.bucket_for(tag);
        let k = self.entries.insert(Entry {
            tag: tag.to_owned(),
            count: 1,
            next_in_bucket: self.buckets[bucket],
            prev_in_order: self.tail,
            next_in_order: None,
        });
        self.buckets[bucket] = Some(k);

        match self.tail {
            Some(old_tail) => self.entries[old_tail].next_in_order = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        1
    }

    /// Current count of `tag`, or `None` if it was never put (or has
    /// been removed). Side-effect-free.
    pub fn get(&self, tag: &str) -> Option<u64> {
        self.find_key(tag).map(|k| self.entries[k].count)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.find_key(tag).is_some()
    }

    /// Forget `tag` entirely, returning its final count.
    ///
    /// The entry is unlinked from the insertion-order list (fixing
    /// head/tail and neighbor links), spliced out of its bucket chain,
    /// and its slot freed. An absent tag leaves the table untouched.
    pub fn remove(&mut self, tag: &str) -> Result<u64, RemoveError> {
        let k = self.find_key(tag).ok_or(RemoveError::NotFound)?;
        let (prev, next) = {
            let entry = &self.entries[k];
            (entry.prev_in_order, entry.next_in_order)
        };

        // Order list first: relink neighbors around the victim.
        match prev {
            Some(p) => self.entries[p].next_in_order = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.entries[n].prev_in_order = prev,
            None => self.tail = prev,
        }

        // Bucket chain: no prev-in-chain pointer is kept, so re-scan
        // from the chain head to find the predecessor and splice.
        let bucket = self.bucket_for(tag);
        let successor = self.entries[k].next_in_bucket;
        if self.buckets[bucket] == Some(k) {
            self.buckets[bucket] = successor;
        } else {
            let mut cursor = self.buckets[bucket];
            while let Some(c) = cursor {
                if self.entries[c].next_in_bucket == Some(k) {
                    self.entries[c].next_in_bucket = successor;
                    break;
                }
                cursor = self.entries[c].next_in_bucket;
            }
        }

        let entry = self
            .entries
            .remove(k)
            .unwrap_or_else(|| unreachable!("found key must be live"));
        Ok(entry.count)
    }

    /// Lazy traversal of all live entries in insertion order, yielding
    /// `(tag, count)`. Double-ended: `.rev()` walks from the tail along
    /// prev-in-order links. Restartable; each call starts fresh.
    pub fn iter(&self) -> OrderedIter<'_> {
        OrderedIter {
            table: self,
            front: self.head,
            back: self.tail,
            exhausted: self.head.is_none(),
        }
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Double-ended iterator over a table's entries in insertion order.
pub struct OrderedIter<'a> {
    table: &'a TagTable,
    front: Option<EntryKey>,
    back: Option<EntryKey>,
    exhausted: bool,
}

impl<'a> Iterator for OrderedIter<'a> {
    type Item = (&'a str, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let k = self.front?;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.front = self.table.entries[k].next_in_order;
        }
        let entry = &self.table.entries[k];
        Some((entry.tag.as_str(), entry.count))
    }
}

impl<'a> DoubleEndedIterator for OrderedIter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let k = self.back?;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.back = self.table.entries[k].prev_in_order;
        }
        let entry = &self.table.entries[k];
        Some((entry.tag.as_str(), entry.count))
    }
}

impl<'a> std::iter::FusedIterator for OrderedIter<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(t: &TagTable) -> Vec<String> {
        t.iter().map(|(tag, _)| tag.to_owned()).collect()
    }

    fn backward(t: &TagTable) -> Vec<String> {
        t.iter().rev().map(|(tag, _)| tag.to_owned()).collect()
    }

    /// Invariant: first put of a tag returns 1 and get then observes 1.
    #[test]
    fn first_put_counts_one() {
        let mut t = TagTable::new();
        assert_eq!(t.put("dog"), 1);
        assert_eq!(t.get("dog"), Some(1));
        assert_eq!(t.len(), 1);
    }

    /// Invariant: n puts of the same tag leave its count at n.
    #[test]
    fn repeated_puts_accumulate() {
        let mut t = TagTable::new();
        for expected in 1..=5 {
            assert_eq!(t.put("dog"), expected);
        }
        assert_eq!(t.get("dog"), Some(5));
        assert_eq!(t.len(), 1, "repeat puts must not add entries");
    }

    /// Invariant: the empty tag is a valid key with its own count.
    #[test]
    fn empty_tag_is_a_valid_key() {
        let mut t = TagTable::new();
        assert_eq!(t.put(""), 1);
        assert_eq!(t.put(""), 2);
        assert_eq!(t.get(""), Some(2));
        assert!(t.contains(""));
    }

    /// Invariant: distinct tags never contaminate each other's counts.
    #[test]
    fn distinct_tags_do_not_cross_contaminate() {
        let mut t = TagTable::new();
        t.put("dog");
        assert_eq!(t.get("cat"), None);
        t.put("cat");
        t.put("dog");
        assert_eq!(t.get("dog"), Some(2));
        assert_eq!(t.get("cat"), Some(1));
    }

    /// Invariant: forward traversal is insertion order, backward is its
    /// reverse, and repeated puts do not move a tag.
    #[test]
    fn traversal_follows_insertion_order() {
        let mut t = TagTable::new();
        t.put("k1");
        t.put("k2");
        t.put("k3");
        t.put("k1"); // count bump must not reorder
        assert_eq!(forward(&t), ["k1", "k2", "k3"]);
        assert_eq!(backward(&t), ["k3", "k2", "k1"]);
    }

    /// Invariant: iter() is restartable; each call walks the full list.
    #[test]
    fn iteration_is_restartable() {
        let mut t = TagTable::new();
        t.put("a");
        t.put("b");
        assert_eq!(forward(&t), ["a", "b"]);
        assert_eq!(forward(&t), ["a", "b"]);
    }

    /// Invariant: a double-ended walk meeting in the middle yields each
    /// entry exactly once.
    #[test]
    fn double_ended_walk_meets_once() {
        let mut t = TagTable::new();
        for tag in ["a", "b", "c"] {
            t.put(tag);
        }
        let mut it = t.iter();
        assert_eq!(it.next().map(|(s, _)| s), Some("a"));
        assert_eq!(it.next_back().map(|(s, _)| s), Some("c"));
        assert_eq!(it.next().map(|(s, _)| s), Some("b"));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    /// Invariant: removing a middle entry relinks its order-list
    /// neighbors in both directions.
    #[test]
    fn remove_middle_relinks_neighbors() {
        let mut t = TagTable::new();
        for tag in ["a", "b", "c"] {
            t.put(tag);
        }
        assert_eq!(t.remove("b"), Ok(1));
        assert_eq!(forward(&t), ["a", "c"]);
        assert_eq!(backward(&t), ["c", "a"]);
        assert_eq!(t.get("b"), None);
    }

    /// Invariant: removing the head advances the head cursor.
    #[test]
    fn remove_head_updates_head() {
        let mut t = TagTable::new();
        for tag in ["a", "b", "c"] {
            t.put(tag);
        }
        assert_eq!(t.remove("a"), Ok(1));
        assert_eq!(forward(&t), ["b", "c"]);
        assert_eq!(backward(&t), ["c", "b"]);
    }

    /// Invariant: removing the tail retreats the tail cursor.
    #[test]
    fn remove_tail_updates_tail() {
        let mut t = TagTable::new();
        for tag in ["a", "b", "c"] {
            t.put(tag);
        }
        assert_eq!(t.remove("c"), Ok(1));
        assert_eq!(forward(&t), ["a", "b"]);
        assert_eq!(backward(&t), ["b", "a"]);
    }

    /// Invariant: removing the sole entry empties both cursors; the
    /// table is reusable afterward.
    #[test]
    fn remove_sole_entry_empties_table() {
        let mut t = TagTable::new();
        t.put("only");
        assert_eq!(t.remove("only"), Ok(1));
        assert!(t.is_empty());
        assert_eq!(forward(&t), Vec::<String>::new());
        assert_eq!(backward(&t), Vec::<String>::new());

        // reinsert after emptying
        t.put("next");
        assert_eq!(forward(&t), ["next"]);
    }

    /// Invariant: removing an absent tag fails without mutating state.
    #[test]
    fn remove_missing_is_not_found_and_harmless() {
        let mut t = TagTable::new();
        t.put("a");
        t.put("b");
        assert_eq!(t.remove("zzz"), Err(RemoveError::NotFound));
        assert_eq!(t.len(), 2);
        assert_eq!(forward(&t), ["a", "b"]);
    }

    /// Invariant: remove returns the tag's final count.
    #[test]
    fn remove_reports_final_count() {
        let mut t = TagTable::new();
        t.put("x");
        t.put("x");
        t.put("x");
        assert_eq!(t.remove("x"), Ok(3));
    }

    /// Invariant: a removed tag reinserted starts over at count 1 and
    /// moves to the order-list tail.
    #[test]
    fn reinserted_tag_starts_fresh_at_tail() {
        let mut t = TagTable::new();
        t.put("a");
        t.put("b");
        t.put("a");
        t.remove("a").unwrap();
        assert_eq!(t.put("a"), 1);
        assert_eq!(forward(&t), ["b", "a"]);
    }

    /// Invariant: chain operations stay correct when every tag collides
    /// into a single bucket (put/get/remove across one long chain).
    #[test]
    fn single_bucket_chain_survives_removals() {
        let mut t = TagTable::with_buckets(1);
        for tag in ["a", "b", "c", "d", "e"] {
            t.put(tag);
        }
        // chain-head ("e"), chain-tail ("a") and chain-middle ("c")
        assert_eq!(t.remove("e"), Ok(1));
        assert_eq!(t.remove("a"), Ok(1));
        assert_eq!(t.remove("c"), Ok(1));
        assert_eq!(t.get("b"), Some(1));
        assert_eq!(t.get("d"), Some(1));
        assert_eq!(t.get("a"), None);
        assert_eq!(forward(&t), ["b", "d"]);
        assert_eq!(backward(&t), ["d", "b"]);
    }

    /// Invariant: dropping a table after a partial removal releases each
    /// surviving entry exactly once (no panic, no leak of the removed
    /// one's slot). Exercised by churning then dropping.
    #[test]
    fn drop_after_partial_removal_is_clean() {
        let mut t = TagTable::with_buckets(3);
        for i in 0..50 {
            t.put(&format!("tag{i}"));
        }
        for i in (0..50).step_by(2) {
            t.remove(&format!("tag{i}")).unwrap();
        }
        assert_eq!(t.len(), 25);
        drop(t);
    }

    #[test]
    #[should_panic(expected = "bucket count must be non-zero")]
    fn zero_buckets_rejected() {
        let _ = TagTable::with_buckets(0);
    }
}
