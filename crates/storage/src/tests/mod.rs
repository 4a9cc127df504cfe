//! Test utilities and module declarations for storage tests.

use postakod_core::LocationRecord;

use crate::MemoryStore;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn record(province: &str, district: &str, neighborhood: &str, code: &str) -> LocationRecord {
    LocationRecord::new(province, district, None, neighborhood, code).unwrap()
}

pub fn sample_records() -> Vec<LocationRecord> {
    vec![
        record("İstanbul", "Kadıköy", "Acıbadem", "34710"),
        record("İstanbul", "Kadıköy", "Acıbadem", "34718"),
        record("İstanbul", "Kadıköy", "Moda", "34710"),
        record("İstanbul", "Üsküdar", "Acıbadem", "34660"),
        record("Ankara", "Çankaya", "Kızılay", "06420"),
    ]
}

pub fn create_test_store() -> MemoryStore {
    MemoryStore::from_records(sample_records())
}

mod backend_tests;
mod memory_tests;
