//! Buffered, seekable result handle

use acorn_core::{DriverError, DriverResult, ResultHandle, Row, Value};

/// Fully buffered result set with a seekable read position.
#[derive(Debug, Clone)]
pub struct MemoryResultHandle {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: usize,
}

impl MemoryResultHandle {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            position: 0,
        }
    }
}

impl ResultHandle for MemoryResultHandle {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn seek(&mut self, offset: usize) -> DriverResult<()> {
        // The end position (offset == row_count) is valid per the handle
        // contract; only positions beyond it are rejected.
        if offset > self.rows.len() {
            return Err(DriverError::new(
                format!(
                    "seek offset {offset} beyond result of {} rows",
                    self.rows.len()
                ),
                0,
                "HY000",
            ));
        }
        self.position = offset;
        Ok(())
    }

    fn fetch(&mut self) -> DriverResult<Option<Row>> {
        match self.rows.get(self.position) {
            Some(values) => {
                self.position += 1;
                Ok(Some(Row::new(self.columns.clone(), values.clone())))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn handle() -> MemoryResultHandle {
        MemoryResultHandle::new(
            vec!["n".into()],
            vec![
                vec![Value::Int64(0)],
                vec![Value::Int64(1)],
                vec![Value::Int64(2)],
            ],
        )
    }

    #[test]
    fn fetch_walks_rows_in_order_and_ends_with_none() {
        let mut handle = handle();
        for expected in 0..3 {
            let row = handle.fetch().unwrap().expect("row present");
            assert_eq!(row.i64("n").unwrap(), expected);
        }
        assert!(handle.fetch().unwrap().is_none());
    }

    #[test]
    fn seek_repositions_the_next_fetch() {
        let mut handle = handle();
        handle.seek(2).unwrap();
        assert_eq!(handle.fetch().unwrap().unwrap().i64("n").unwrap(), 2);
        handle.seek(0).unwrap();
        assert_eq!(handle.fetch().unwrap().unwrap().i64("n").unwrap(), 0);
    }

    #[test]
    fn end_position_is_seekable_but_past_it_is_not() {
        let mut handle = handle();
        handle.seek(3).unwrap();
        assert!(handle.fetch().unwrap().is_none());
        assert!(handle.seek(4).is_err());
    }
}
