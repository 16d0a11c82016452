//! Entry generation and the entry list controller.
//!
//! An [`Entry`] is a random token suffixed with its insertion ordinal, e.g.
//! `"x8Kq0TbZ2m 4"`. The [`EntryList`] owns the ordered entries, grows by one
//! entry per [`EntryList::tick`] and remembers the most recent insertion by
//! identity, so the marker stays valid when later insertions shift indices.

mod token;

pub use token::{ALPHABET, TOKEN_LEN, random_token, subsec_millis};

use rand::Rng;

/// Number of entries created by [`EntryList::initialize`].
pub const INITIAL_ENTRIES: usize = 3;

/// Stable identity of an entry, independent of its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One generated, displayed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    ordinal: usize,
    text: String,
}

impl Entry {
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// List length at the moment this entry was created.
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether `term` highlights this entry.
    ///
    /// Matching is a case-sensitive substring test; an empty term never
    /// matches.
    pub fn matches(&self, term: &str) -> bool {
        !term.is_empty() && self.text.contains(term)
    }
}

/// Result of a single [`EntryList::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    /// Position the new entry was spliced in at.
    pub index: usize,
    /// Identity of the new entry.
    pub id: EntryId,
}

/// Ordered entries plus the last-inserted marker.
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<Entry>,
    next_id: u64,
    last_inserted: Option<EntryId>,
}

impl EntryList {
    /// Create a list holding [`INITIAL_ENTRIES`] fresh entries with ordinals
    /// `0, 1, 2` in order. No entry is marked as last inserted.
    pub fn initialize<R: Rng + ?Sized>(rng: &mut R, millis: u32) -> Self {
        let mut list = Self::default();
        for ordinal in 0..INITIAL_ENTRIES {
            let entry = list.make_entry(rng, ordinal, millis);
            list.entries.push(entry);
        }
        list
    }

    /// Insert one new entry at a uniformly random index in `0..=len`.
    ///
    /// The entry's ordinal is the pre-insertion length. All existing entries
    /// keep their relative order, and the new entry becomes the last-inserted
    /// marker.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, millis: u32) -> Insertion {
        let index = rng.gen_range(0..=self.entries.len());
        self.insert_at(rng, index, millis)
    }

    /// Insert a new entry at `index` (clamped to the list length).
    pub fn insert_at<R: Rng + ?Sized>(&mut self, rng: &mut R, index: usize, millis: u32) -> Insertion {
        let index = index.min(self.entries.len());
        let entry = self.make_entry(rng, self.entries.len(), millis);
        let id = entry.id;
        self.entries.insert(index, entry);
        self.last_inserted = Some(id);
        tracing::trace!(index, id = id.get(), len = self.entries.len(), "entry inserted");
        Insertion { index, id }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identity of the most recently inserted entry, if any tick happened.
    pub const fn last_inserted(&self) -> Option<EntryId> {
        self.last_inserted
    }

    /// Current position of the most recently inserted entry.
    pub fn last_inserted_index(&self) -> Option<usize> {
        self.last_inserted.and_then(|id| self.position(id))
    }

    pub fn last_inserted_entry(&self) -> Option<&Entry> {
        self.last_inserted_index().and_then(|idx| self.entries.get(idx))
    }

    /// Current position of the entry with `id`.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Entries highlighted by `term`, in display order.
    pub fn matching<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |entry| entry.matches(term))
    }

    fn make_entry<R: Rng + ?Sized>(&mut self, rng: &mut R, ordinal: usize, millis: u32) -> Entry {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        Entry {
            id,
            ordinal,
            text: format!("{} {ordinal}", random_token(rng, TOKEN_LEN, millis)),
        }
    }
}
