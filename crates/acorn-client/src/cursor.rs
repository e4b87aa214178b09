//! Result cursor: forward iteration and random access over one handle
//!
//! The cursor exclusively owns its driver result handle. Two small
//! capabilities compose on it: [`RowIterator`] for stateful forward
//! iteration and [`IndexedRows`] for counted random access. Keeping them
//! separate keeps the seek-and-restore invariant of `get` testable on its
//! own.

use acorn_core::{AcornError, Record, ResolvedRecordType, Result, ResultHandle};

/// Stateful forward iteration over decoded records.
pub trait RowIterator {
    /// Record at the iteration position, `None` before any rows exist or
    /// after exhaustion
    fn current(&self) -> Option<&Record>;

    /// Iteration position. Saturates at `count()` once exhausted.
    fn key(&self) -> usize;

    /// Move to the next row, decoding it through the resolved record type
    fn advance(&mut self) -> Result<()>;

    /// Seek back to row 0 and reload it
    fn reset(&mut self) -> Result<()>;

    /// Whether the iteration position holds a record
    fn is_valid(&self) -> bool;
}

/// Counted, randomly indexable read access to decoded records.
pub trait IndexedRows {
    /// Server-computed row count
    fn count(&self) -> usize;

    /// Whether `offset` addresses a row
    fn has(&self, offset: usize) -> bool;

    /// Decode the row at `offset` without disturbing iteration state
    fn get(&mut self, offset: usize) -> Result<Record>;

    /// Result rows are read-only; always fails with `NotWritable`.
    fn set(&mut self, _offset: usize, _record: Record) -> Result<()> {
        Err(AcornError::NotWritable)
    }

    /// Result rows are read-only; always fails with `NotWritable`.
    fn unset(&mut self, _offset: usize) -> Result<()> {
        Err(AcornError::NotWritable)
    }
}

/// Cursor over a buffered procedure result.
///
/// Comes back from construction pre-positioned on row 0 (when any rows
/// exist), so `current()` is immediately meaningful without a leading
/// `advance()`.
pub struct RowCursor {
    handle: Box<dyn ResultHandle>,
    record_type: ResolvedRecordType,
    rows: usize,
    index: usize,
    current: Option<Record>,
}

impl std::fmt::Debug for RowCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowCursor")
            .field("record_type", &self.record_type.name())
            .field("rows", &self.rows)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl RowCursor {
    /// Wrap a driver result handle, taking exclusive ownership of it.
    pub fn new(handle: Box<dyn ResultHandle>, record_type: ResolvedRecordType) -> Result<Self> {
        let rows = handle.row_count();
        let mut cursor = Self {
            handle,
            record_type,
            rows,
            index: 0,
            current: None,
        };
        cursor.reset()?;
        tracing::debug!(rows, record_type = %cursor.record_type.name(), "result cursor ready");
        Ok(cursor)
    }

    /// Fully qualified name of the record type rows decode into
    pub fn record_type(&self) -> &str {
        self.record_type.name()
    }

    /// The sole row of a single-row result, `None` for any other count.
    pub fn singleton(&mut self) -> Result<Option<Record>> {
        if self.rows == 1 {
            self.get(0).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Seek to `offset`, fetch that row and decode it. Leaves the handle
    /// positioned after `offset`.
    fn decode_at(&mut self, offset: usize) -> Result<Record> {
        self.handle
            .seek(offset)
            .map_err(|e| AcornError::Driver(e.to_string()))?;
        let row = self
            .handle
            .fetch()
            .map_err(|e| AcornError::Driver(e.to_string()))?
            .ok_or_else(|| {
                AcornError::Driver(format!("row {offset} missing from buffered result"))
            })?;
        self.record_type.decode(&row)
    }
}

impl RowIterator for RowCursor {
    fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    fn key(&self) -> usize {
        self.index
    }

    fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    fn reset(&mut self) -> Result<()> {
        self.handle
            .seek(0)
            .map_err(|e| AcornError::Driver(e.to_string()))?;
        self.index = 0;
        self.current = if self.rows == 0 {
            None
        } else {
            Some(self.decode_at(0)?)
        };
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        if self.index >= self.rows {
            // Already exhausted; stay parked at the end position.
            self.current = None;
            return Ok(());
        }
        self.index += 1;
        self.current = if self.index < self.rows {
            Some(self.decode_at(self.index)?)
        } else {
            None
        };
        Ok(())
    }
}

impl IndexedRows for RowCursor {
    fn count(&self) -> usize {
        self.rows
    }

    fn has(&self, offset: usize) -> bool {
        offset < self.rows
    }

    fn get(&mut self, offset: usize) -> Result<Record> {
        if offset >= self.rows {
            return Err(AcornError::IndexOutOfRange {
                offset,
                rows: self.rows,
            });
        }
        let decoded = self.decode_at(offset);
        // Restore the iteration position so interleaved random access is
        // invisible to forward iteration. `index` may be the end position;
        // the handle contract allows seeking there.
        self.handle
            .seek(self.index)
            .map_err(|e| AcornError::Driver(e.to_string()))?;
        decoded
    }
}
