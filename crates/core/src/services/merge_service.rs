use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;

/// How an incoming holdings set reconciles against existing holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Insert unknown tickers; leave existing records untouched.
    AddOnly,
    /// Insert unknown tickers; replace existing records wholesale.
    Overwrite,
}

/// What a merge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MergeReport {
    pub added: usize,
    pub updated: usize,
}

/// Reconciles an imported holdings set (migration/restore of an older
/// backup) against a portfolio.
///
/// Merge is a union: holdings absent from the incoming set are never
/// deleted. Incoming records arrive default-filled — deserialization
/// supplies defaults for fields older documents lack.
pub struct MergeEngine;

impl MergeEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn merge(
        &self,
        portfolio: &mut Portfolio,
        incoming: BTreeMap<String, Holding>,
        mode: MergeMode,
    ) -> MergeReport {
        let mut report = MergeReport::default();

        for (ticker, record) in incoming {
            let ticker = ticker.trim().to_uppercase();
            if ticker.is_empty() {
                continue;
            }
            match portfolio.holdings.entry(ticker) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                    report.added += 1;
                }
                Entry::Occupied(mut slot) => {
                    if mode == MergeMode::Overwrite {
                        slot.insert(record);
                        report.updated += 1;
                    }
                }
            }
        }

        if report.added + report.updated > 0 {
            portfolio.touch();
        }
        report
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}
