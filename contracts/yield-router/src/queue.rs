use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::{Item, Map, U64Key};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// FIFO bounds. `start` is the index of the next element to service, `end`
/// the index the next pushed element receives. Indexes grow monotonically and
/// are never reused, so `end - start` is the live length and any index below
/// `start` refers to an already-serviced element.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema, Default)]
pub struct QueueRange {
    pub start: u64,
    pub end: u64,
}

impl QueueRange {
    pub fn length(&self) -> u64 {
        self.end - self.start
    }
}

/// Append-only FIFO of pending withdrawal stages backed by a `Map` of
/// elements plus an `Item` holding the live index range. Elements are only
/// ever inspected and removed at the head; whether the head is ready to be
/// serviced is the caller's concern.
pub struct Queue<'a, T> {
    items: Map<'a, U64Key, T>,
    range: Item<'a, QueueRange>,
}

impl<'a, T> Queue<'a, T> {
    pub const fn new(items_namespace: &'a str, range_namespace: &'a str) -> Self {
        Queue {
            items: Map::new(items_namespace),
            range: Item::new(range_namespace),
        }
    }
}

impl<'a, T> Queue<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn init(&self, storage: &mut dyn Storage) -> StdResult<()> {
        self.range.save(storage, &QueueRange::default())
    }

    pub fn range(&self, storage: &dyn Storage) -> StdResult<QueueRange> {
        self.range.load(storage)
    }

    pub fn length(&self, storage: &dyn Storage) -> StdResult<u64> {
        Ok(self.range(storage)?.length())
    }

    /// Append `item` at the tail and return its assigned index
    pub fn push_back(&self, storage: &mut dyn Storage, item: &T) -> StdResult<u64> {
        let mut range = self.range.load(storage)?;
        let index = range.end;
        self.items.save(storage, index.into(), item)?;
        range.end += 1;
        self.range.save(storage, &range)?;
        Ok(index)
    }

    /// Head element without removing it, `None` when empty
    pub fn peek_front(&self, storage: &dyn Storage) -> StdResult<Option<(u64, T)>> {
        let range = self.range.load(storage)?;
        if range.start == range.end {
            return Ok(None);
        }
        let item = self.items.load(storage, range.start.into())?;
        Ok(Some((range.start, item)))
    }

    /// Remove and return the head element, `None` when empty
    pub fn pop_front(&self, storage: &mut dyn Storage) -> StdResult<Option<(u64, T)>> {
        let mut range = self.range.load(storage)?;
        if range.start == range.end {
            return Ok(None);
        }
        let index = range.start;
        let item = self.items.load(storage, index.into())?;
        self.items.remove(storage, index.into());
        range.start += 1;
        self.range.save(storage, &range)?;
        Ok(Some((index, item)))
    }

    /// Element at an absolute index; `None` once serviced or not yet pushed
    pub fn get(&self, storage: &dyn Storage, index: u64) -> StdResult<Option<T>> {
        self.items.may_load(storage, index.into())
    }
}
