//! Aggregator thread
//!
//! The single consumer of the record queue. It owns the occurrence map for
//! the whole run and hands it back through its join handle.

use crossbeam_channel::Receiver;

use super::types::{Aggregate, Ingested};

/// Drain the record queue until every sender is gone and nothing is buffered
pub fn aggregator_thread(records: Receiver<Ingested>) -> Aggregate {
    let mut aggregate = Aggregate::default();

    // recv() only fails once the channel is disconnected and empty
    while let Ok(item) = records.recv() {
        aggregate.fold(item);
    }

    aggregate
}

impl Aggregate {
    pub fn fold(&mut self, item: Ingested) {
        self.records_read += 1;

        if let Ingested::Record(record) = item {
            self.records_accepted += 1;
            self.occurrences
                .entry(record.source)
                .or_default()
                .insert(record.key);
        }
    }

    /// Number of distinct source files seen
    pub fn unique_sources(&self) -> usize {
        self.occurrences.len()
    }
}
