//! Reservation Ledger — the mutable, file-backed store of reservations.
//!
//! The ledger owns the in-memory list exclusively and is the sole writer
//! of the backing file. Every mutation rewrites the whole file via a
//! write-temp-then-rename, so a crash mid-write never leaves a torn
//! document behind. A failed write is logged and the in-memory mutation
//! stays applied — callers are not told about partial persistence.
//!
//! Records are never physically deleted: cancellation flips `status` to
//! `cancelled` and the record remains addressable by id.
//!
//! No field-format validation happens here; that is the dialogue layer's
//! job. `dish_ids` are unchecked references into the catalog by design.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Confirmed,
    Cancelled,
}

/// One table reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Zero-padded sequential id: `RES0001`, `RES0002`, ...
    pub id: String,
    pub customer_name: String,
    pub contact_info: String,
    /// Expected `YYYY-MM-DD`; stored as given.
    pub date: String,
    /// Expected `HH:MM` 24-hour; stored as given.
    pub time: String,
    pub party_size: u32,
    /// Catalog item ids. Referential integrity is never checked.
    pub dish_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub status: Status,
}

/// Field changes for [`Ledger::update`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ReservationUpdate {
    pub customer_name: Option<String>,
    pub contact_info: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub party_size: Option<u32>,
}

/// Why a ledger file failed to load or persist. Logged, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("failed to access reservation file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse reservation file: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// File-backed, append-mostly store of [`Reservation`] records.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    reservations: Vec<Reservation>,
}

impl Ledger {
    /// Load the ledger from a JSON file.
    ///
    /// An absent file is a normal empty store. An unreadable or
    /// unparseable file is logged and also treated as empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let reservations = if path.exists() {
            match Self::try_load(&path) {
                Ok(list) => list,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load reservations, starting empty");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        Ledger { path, reservations }
    }

    fn try_load(path: &Path) -> Result<Vec<Reservation>, LedgerError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Create a new confirmed reservation, persist, and return it.
    ///
    /// The id is derived from the current record count; ids are unique
    /// for the lifetime of a process run.
    pub fn create(
        &mut self,
        customer_name: &str,
        contact_info: &str,
        date: &str,
        time: &str,
        party_size: u32,
        dish_ids: Vec<String>,
    ) -> Reservation {
        let id = format!("RES{:04}", self.reservations.len() + 1);
        let reservation = Reservation {
            id,
            customer_name: customer_name.to_string(),
            contact_info: contact_info.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            party_size,
            dish_ids,
            created_at: Utc::now(),
            status: Status::Confirmed,
        };
        self.reservations.push(reservation.clone());
        self.persist();
        reservation
    }

    /// First reservation with the given id, cancelled or not.
    pub fn get(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Merge field changes into the matching record and persist.
    /// Unknown id is a no-op returning `None`; the file is not rewritten.
    pub fn update(&mut self, id: &str, changes: ReservationUpdate) -> Option<Reservation> {
        let reservation = self.reservations.iter_mut().find(|r| r.id == id)?;
        if let Some(name) = changes.customer_name {
            reservation.customer_name = name;
        }
        if let Some(contact) = changes.contact_info {
            reservation.contact_info = contact;
        }
        if let Some(date) = changes.date {
            reservation.date = date;
        }
        if let Some(time) = changes.time {
            reservation.time = time;
        }
        if let Some(party_size) = changes.party_size {
            reservation.party_size = party_size;
        }
        let updated = reservation.clone();
        self.persist();
        Some(updated)
    }

    /// Flip the matching record to cancelled and persist. Returns whether
    /// a record with that id existed.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.reservations.iter_mut().find(|r| r.id == id) {
            Some(reservation) => {
                reservation.status = Status::Cancelled;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// All non-cancelled reservations whose date equals the argument
    /// exactly. No normalization of either side.
    pub fn by_date(&self, date: &str) -> Vec<&Reservation> {
        self.reservations
            .iter()
            .filter(|r| r.date == date && r.status != Status::Cancelled)
            .collect()
    }

    /// Append a dish id to the matching record, persist, and report
    /// whether the reservation existed. Appending an already-present dish
    /// is a no-op that still reports success. The dish id itself is never
    /// checked against the catalog.
    pub fn add_dish(&mut self, id: &str, dish_id: &str) -> bool {
        match self.reservations.iter_mut().find(|r| r.id == id) {
            Some(reservation) => {
                if !reservation.dish_ids.iter().any(|d| d == dish_id) {
                    reservation.dish_ids.push(dish_id.to_string());
                    self.persist();
                }
                true
            }
            None => false,
        }
    }

    /// Number of records, cancelled included.
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Rewrite the whole backing file. Write failures are logged; the
    /// in-memory list is authoritative either way.
    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!(path = %self.path.display(), error = %e, "failed to persist reservations");
        }
    }

    fn try_persist(&self) -> Result<(), LedgerError> {
        let raw = serde_json::to_string_pretty(&self.reservations)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_ledger() -> (tempfile::TempDir, Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::load(dir.path().join("reservations.json"));
        (dir, ledger)
    }

    #[test]
    fn test_ids_are_zero_padded_and_sequential() {
        let (_dir, mut ledger) = temp_ledger();
        let a = ledger.create("Ann", "555-0001", "2025-07-01", "18:00", 2, vec![]);
        let b = ledger.create("Bob", "555-0002", "2025-07-01", "19:00", 4, vec![]);
        assert_eq!(a.id, "RES0001");
        assert_eq!(b.id, "RES0002");
        assert_eq!(a.status, Status::Confirmed);
    }

    #[test]
    fn test_cancel_is_a_status_flip_not_a_delete() {
        let (_dir, mut ledger) = temp_ledger();
        let r = ledger.create("Ann", "555-0001", "2025-07-01", "18:00", 2, vec![]);
        assert!(ledger.cancel(&r.id));

        // by_date no longer returns it
        assert!(ledger.by_date("2025-07-01").is_empty());
        // but get still does, with the flipped status
        let fetched = ledger.get(&r.id).unwrap();
        assert_eq!(fetched.status, Status::Cancelled);
    }

    #[test]
    fn test_cancel_unknown_id_returns_false() {
        let (_dir, mut ledger) = temp_ledger();
        assert!(!ledger.cancel("RES9999"));
    }

    #[test]
    fn test_by_date_exact_string_equality() {
        let (_dir, mut ledger) = temp_ledger();
        ledger.create("Ann", "555-0001", "2025-07-01", "18:00", 2, vec![]);
        ledger.create("Bob", "555-0002", "2025-07-02", "19:00", 4, vec![]);
        assert_eq!(ledger.by_date("2025-07-01").len(), 1);
        // no normalization: a differently formatted date does not match
        assert!(ledger.by_date("2025-7-1").is_empty());
    }

    #[test]
    fn test_update_merges_and_unknown_is_noop() {
        let (_dir, mut ledger) = temp_ledger();
        let r = ledger.create("Ann", "555-0001", "2025-07-01", "18:00", 2, vec![]);

        let updated = ledger
            .update(
                &r.id,
                ReservationUpdate {
                    party_size: Some(6),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.party_size, 6);
        assert_eq!(updated.customer_name, "Ann");

        assert!(ledger
            .update("RES9999", ReservationUpdate::default())
            .is_none());
    }

    #[test]
    fn test_add_dish_is_permissive_and_idempotent() {
        let (_dir, mut ledger) = temp_ledger();
        let r = ledger.create("Ann", "555-0001", "2025-07-01", "18:00", 2, vec![]);

        // dish ids are never validated against the catalog
        assert!(ledger.add_dish(&r.id, "NOT_A_REAL_DISH"));
        assert!(ledger.add_dish(&r.id, "NOT_A_REAL_DISH"));
        assert_eq!(ledger.get(&r.id).unwrap().dish_ids.len(), 1);

        assert!(!ledger.add_dish("RES9999", "MAIN001"));
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.json");

        {
            let mut ledger = Ledger::load(&path);
            ledger.create("Ann", "555-0001", "2025-07-01", "18:00", 2, vec!["MAIN001".into()]);
            ledger.create("Bob", "555-0002", "2025-07-02", "19:00", 4, vec![]);
        }

        let reloaded = Ledger::load(&path);
        assert_eq!(reloaded.len(), 2);
        let ann = reloaded.get("RES0001").unwrap();
        assert_eq!(ann.customer_name, "Ann");
        assert_eq!(ann.dish_ids, vec!["MAIN001".to_string()]);
    }

    #[test]
    fn test_backing_file_is_always_a_full_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.json");

        let mut ledger = Ledger::load(&path);
        ledger.create("Ann", "555-0001", "2025-07-01", "18:00", 2, vec![]);
        ledger.cancel("RES0001");

        let raw = std::fs::read_to_string(&path).unwrap();
        let on_disk: Vec<Reservation> = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].status, Status::Cancelled);
    }

    #[test]
    fn test_absent_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::load(dir.path().join("nope.json"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.json");
        std::fs::write(&path, "{not json[").unwrap();
        let ledger = Ledger::load(&path);
        assert!(ledger.is_empty());
    }
}
