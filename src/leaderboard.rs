//! Leaderboard: bounded top-K ranking of `(tag, count)` pairs.
//!
//! The table feeds every `put` result through `record`. Slots are kept
//! sorted by descending count; a tag already listed is re-ranked in
//! place, a new tag is admitted when the board has room or its count
//! reaches the current floor (evicting the floor holder). On equal
//! counts the most recently updated tag ranks first.
//!
//! The board is streaming: it only sees counts as they happen, so a tag
//! enters it the moment its running count beats the floor, not
//! retroactively.

struct Slot {
    tag: String,
    count: u64,
}

pub struct Leaderboard {
    slots: Vec<Slot>,
    k: usize,
}

impl Leaderboard {
    /// Board holding at most `k` tags.
    pub fn new(k: usize) -> Self {
        Self {
            slots: Vec::with_capacity(k),
            k,
        }
    }

    /// Observe `tag` at its updated running `count`.
    pub fn record(&mut self, tag: &str, count: u64) {
        if let Some(i) = self.slots.iter().position(|s| s.tag == tag) {
            self.slots.remove(i);
        } else if self.slots.len() >= self.k
            && self.slots.last().map_or(true, |s| s.count > count)
        {
            return; // below the floor, board full
        }

        // Rank above any slot with an equal or lower count.
        let at = self
            .slots
            .iter()
            .position(|s| s.count <= count)
            .unwrap_or(self.slots.len());
        self.slots.insert(
            at,
            Slot {
                tag: tag.to_owned(),
                count,
            },
        );
        self.slots.truncate(self.k);
    }

    /// Ranked slots, best first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.slots.iter().map(|s| (s.tag.as_str(), s.count))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
