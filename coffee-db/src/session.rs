//! Unit of work for staged cup changes.
//!
//! A [`Session`] collects inserts and updates across any number of user
//! actions without touching the database. [`Session::commit`] writes them
//! all in one transaction; [`Session::rollback`] forgets them.

use std::collections::BTreeMap;

use coffee_catalog::CupFields;
use rusqlite::Connection;

use crate::operations::{insert_cup, update_cup, OperationError};

/// Staged, uncommitted cup changes.
#[derive(Debug, Default)]
pub struct Session {
    inserts: Vec<CupFields>,
    /// Latest staged values per cup id.
    updates: BTreeMap<i64, CupFields>,
}

/// What a successful commit wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitStats {
    /// Ids assigned to inserted cups, in staging order.
    pub inserted: Vec<i64>,
    pub updated: usize,
}

impl CommitStats {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated == 0
    }
}

impl Session {
    /// Begin an empty session.
    pub fn begin() -> Self {
        Self::default()
    }

    /// Stage a new cup.
    pub fn stage_insert(&mut self, cup: CupFields) {
        self.inserts.push(cup);
    }

    /// Stage new values for an existing cup, replacing earlier staged values.
    pub fn stage_update(&mut self, id: i64, cup: CupFields) {
        self.updates.insert(id, cup);
    }

    /// Drop any staged update for `id`. Returns true if one existed.
    pub fn unstage_update(&mut self, id: i64) -> bool {
        self.updates.remove(&id).is_some()
    }

    /// Drop staged inserts, keeping staged updates.
    pub fn discard_inserts(&mut self) -> usize {
        let n = self.inserts.len();
        self.inserts.clear();
        n
    }

    pub fn staged_update(&self, id: i64) -> Option<&CupFields> {
        self.updates.get(&id)
    }

    pub fn pending_inserts(&self) -> usize {
        self.inserts.len()
    }

    pub fn pending_updates(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty()
    }

    /// Write every staged change in a single transaction.
    ///
    /// On success the session is empty. On failure nothing is written and
    /// the staged changes are kept.
    pub fn commit(&mut self, conn: &mut Connection) -> Result<CommitStats, OperationError> {
        if self.is_empty() {
            log::debug!("Commit with no staged changes");
            return Ok(CommitStats::default());
        }

        let tx = conn.transaction()?;
        let mut stats = CommitStats::default();
        for (id, cup) in &self.updates {
            update_cup(&tx, *id, cup)?;
            stats.updated += 1;
        }
        for cup in &self.inserts {
            stats.inserted.push(insert_cup(&tx, cup)?);
        }
        tx.commit()?;

        self.inserts.clear();
        self.updates.clear();
        log::info!(
            "Committed {} new and {} updated cups",
            stats.inserted.len(),
            stats.updated
        );
        Ok(stats)
    }

    /// Forget every staged change. Returns how many were dropped.
    pub fn rollback(&mut self) -> usize {
        let dropped = self.inserts.len() + self.updates.len();
        self.inserts.clear();
        self.updates.clear();
        if dropped > 0 {
            log::debug!("Rolled back {} staged changes", dropped);
        }
        dropped
    }
}
