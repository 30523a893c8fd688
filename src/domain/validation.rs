use crate::domain::types::MarketRecord;
use tracing::warn;

/// Centralized validator for generated series integrity.
///
/// Rejects samples that are physically impossible (non-positive or
/// non-finite price, non-finite or negative load) and series whose
/// timestamps are not strictly increasing.
pub struct SeriesValidator;

impl SeriesValidator {
    /// Validates a single record. Returns true if valid, false otherwise.
    pub fn validate_record(record: &MarketRecord) -> bool {
        if !record.price.is_finite() || record.price <= 0.0 {
            warn!(
                "Validation FAILED: sample at {} has non-positive price: {}",
                record.timestamp, record.price
            );
            return false;
        }
        if !record.load.is_finite() || record.load < 0.0 {
            warn!(
                "Validation FAILED: sample at {} has invalid load: {}",
                record.timestamp, record.load
            );
            return false;
        }
        true
    }

    /// Validates a whole series. Returns the number of invalid samples;
    /// 0 means the series is clean.
    pub fn validate_series(records: &[MarketRecord]) -> usize {
        let mut invalid = 0;

        for record in records {
            if !Self::validate_record(record) {
                invalid += 1;
            }
        }

        for pair in records.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                warn!(
                    "Validation FAILED: timestamps not strictly increasing at {}",
                    pair[1].timestamp
                );
                invalid += 1;
            }
        }

        invalid
    }
}
