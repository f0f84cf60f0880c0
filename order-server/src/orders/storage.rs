//! redb-based storage layer for orders
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` (JSON) | Order records with embedded lines |
//! | `table_index` | `table_number` | `order_id` | Occupancy index over live orders |
//!
//! The `table_index` table is the Table Occupancy Index: it holds exactly
//! the tables whose order is in a live status (NEW or PAID). It is written
//! only inside the same transaction that creates or transitions the order,
//! so the "at most one live order per table" invariant lives in the write
//! path rather than a read-then-write pre-check.
//!
//! # Serialization
//!
//! redb permits a single write transaction at a time. Admission's
//! check-and-register for a table and a transition's revalidation against
//! the current status both run inside one write transaction, which makes
//! same-table admissions and same-order transitions mutually exclusive.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::order::{Order, OrderStatus};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for order records: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Occupancy index: key = table_number, value = order_id of the live order
const TABLE_INDEX: TableDefinition<&str, &str> = TableDefinition::new("table_index");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Order storage backed by redb
///
/// Commits are durable as soon as `commit()` returns (copy-on-write with
/// atomic pointer swap), so a power cut never leaves a half-admitted
/// order or a dangling occupancy entry.
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Create tables up front so readers never race table creation
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(TABLE_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(TABLE_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Order Operations ==========

    /// Store an order (insert or overwrite) within a transaction
    pub fn store_order_txn(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get an order by id (read-only)
    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an order by id (within transaction)
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all orders (unordered)
    pub fn all_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    // ========== Table Occupancy Index ==========

    /// Look up the live order occupying a table (within transaction)
    ///
    /// A stale index entry pointing at a missing or non-live order is
    /// treated as unoccupied; the next register overwrites it.
    pub fn occupant_txn(
        &self,
        txn: &WriteTransaction,
        table_number: &str,
    ) -> StorageResult<Option<Order>> {
        let index = txn.open_table(TABLE_INDEX)?;

        let Some(entry) = index.get(table_number)? else {
            return Ok(None);
        };
        let order_id = entry.value().to_string();
        drop(entry);
        drop(index);

        match self.get_order_txn(txn, &order_id)? {
            Some(order) if order.is_live() => Ok(Some(order)),
            _ => Ok(None),
        }
    }

    /// Look up the live order occupying a table (read-only)
    pub fn occupant_of(&self, table_number: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(TABLE_INDEX)?;

        let Some(entry) = index.get(table_number)? else {
            return Ok(None);
        };
        let order_id = entry.value().to_string();

        let orders = read_txn.open_table(ORDERS_TABLE)?;
        match orders.get(order_id.as_str())? {
            Some(value) => {
                let order: Order = serde_json::from_slice(value.value())?;
                Ok(Some(order).filter(|o| o.is_live()))
            }
            None => Ok(None),
        }
    }

    /// Register a table as occupied by an order
    ///
    /// Called only by the admission service, inside the transaction that
    /// persists the order, and only for live initial statuses.
    pub fn register_table_txn(
        &self,
        txn: &WriteTransaction,
        table_number: &str,
        order_id: &str,
    ) -> StorageResult<()> {
        let mut index = txn.open_table(TABLE_INDEX)?;
        index.insert(table_number, order_id)?;
        Ok(())
    }

    /// Release a table
    ///
    /// Called only by the lifecycle manager when an order reaches DONE,
    /// inside the transaction that persists the status change.
    pub fn release_table_txn(
        &self,
        txn: &WriteTransaction,
        table_number: &str,
    ) -> StorageResult<()> {
        let mut index = txn.open_table(TABLE_INDEX)?;
        index.remove(table_number)?;
        Ok(())
    }

    /// All currently occupied tables with their order ids
    pub fn occupied_tables(&self) -> StorageResult<Vec<(String, String)>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(TABLE_INDEX)?;

        let mut entries = Vec::new();
        for result in index.iter()? {
            let (key, value) = result?;
            entries.push((key.value().to_string(), value.value().to_string()));
        }
        Ok(entries)
    }
}

impl std::fmt::Debug for OrderStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStorage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderLine, PaymentMethod};
    use shared::util::now_millis;

    fn sample_order(id: &str, table: &str, status: OrderStatus) -> Order {
        let now = now_millis();
        Order {
            id: id.to_string(),
            customer: "Budi".to_string(),
            table_number: table.to_string(),
            payment_method: PaymentMethod::Cash,
            status,
            total_price: 50_000,
            created_at: now,
            updated_at: now,
            lines: vec![OrderLine {
                menu_item_id: 5,
                name: "Nasi Goreng".to_string(),
                quantity: 2,
                note: String::new(),
                unit_price_at_order_time: 25_000,
            }],
        }
    }

    #[test]
    fn store_and_fetch_order_roundtrip() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let order = sample_order("o-1", "12", OrderStatus::New);
        let txn = storage.begin_write().unwrap();
        storage.store_order_txn(&txn, &order).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_order("o-1").unwrap().unwrap();
        assert_eq!(loaded, order);
        assert!(storage.get_order("missing").unwrap().is_none());
    }

    #[test]
    fn occupancy_register_and_release() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let order = sample_order("o-1", "12", OrderStatus::New);
        let txn = storage.begin_write().unwrap();
        storage.store_order_txn(&txn, &order).unwrap();
        storage.register_table_txn(&txn, "12", "o-1").unwrap();
        txn.commit().unwrap();

        let occupant = storage.occupant_of("12").unwrap().unwrap();
        assert_eq!(occupant.id, "o-1");
        assert!(storage.occupant_of("7").unwrap().is_none());

        let txn = storage.begin_write().unwrap();
        storage.release_table_txn(&txn, "12").unwrap();
        txn.commit().unwrap();

        assert!(storage.occupant_of("12").unwrap().is_none());
    }

    #[test]
    fn stale_index_entry_reads_as_unoccupied() {
        let storage = OrderStorage::open_in_memory().unwrap();

        // Index points at an order that was never stored
        let txn = storage.begin_write().unwrap();
        storage.register_table_txn(&txn, "3", "ghost").unwrap();
        txn.commit().unwrap();

        assert!(storage.occupant_of("3").unwrap().is_none());

        let txn = storage.begin_write().unwrap();
        assert!(storage.occupant_txn(&txn, "3").unwrap().is_none());
    }
}
