// ---------------------------------------------------------------------------
// DataRecord – one annual observation
// ---------------------------------------------------------------------------

/// A single observation, positioned by arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRecord {
    /// Position in the source sequence (usually one per year).
    pub index: usize,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Dataset – an ordered annual series
// ---------------------------------------------------------------------------

/// An ordered, read-only series of observations from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Where the data came from; shows up in logs and errors.
    pub name: String,
    records: Vec<DataRecord>,
}

impl Dataset {
    /// Number each value by its position.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| DataRecord { index, value })
            .collect();
        Dataset {
            name: name.into(),
            records,
        }
    }

    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&DataRecord> {
        self.records.get(index)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.value)
    }

    /// Smallest observed value, `None` when empty.
    pub fn min(&self) -> Option<f64> {
        self.values().reduce(f64::min)
    }

    /// Largest observed value, `None` when empty.
    pub fn max(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_numbered_in_arrival_order() {
        let ds = Dataset::from_values("t", vec![3.0, 1.0, 2.0]);
        let indices: Vec<usize> = ds.records().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(ds.get(1).map(|r| r.value), Some(1.0));
        assert!(ds.get(3).is_none());
    }

    #[test]
    fn extremes() {
        let ds = Dataset::from_values("t", vec![44.1, 42.5, 48.3, 45.0]);
        assert_eq!(ds.min(), Some(42.5));
        assert_eq!(ds.max(), Some(48.3));

        let empty = Dataset::from_values("e", Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.min(), None);
    }
}
