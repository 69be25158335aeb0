//! Shared fixtures for the spec suite

pub use fedreg_core::{ApplicantProfile, CallerScope, EntryKind, Gender};
pub use fedreg_engine::Registry;
pub use fedreg_render::FakeRenderer;
pub use fedreg_storage::JournalStore;
pub use std::path::Path;
pub use tempfile::TempDir;

/// A valid profile; vary district/national id per test
pub fn profile(name: &str, district: &str, national_id: &str) -> ApplicantProfile {
    ApplicantProfile {
        name: name.to_string(),
        date_of_birth: chrono_date(2012, 3, 14),
        age: 13,
        weight_kg: Some(41.5),
        gender: Gender::Female,
        guardian_name: Some("R. Rao".to_string()),
        state: "Kerala".to_string(),
        district: district.to_string(),
        belt_grade: "Green".to_string(),
        school: None,
        national_id: if national_id.is_empty() {
            None
        } else {
            Some(national_id.to_string())
        },
    }
}

fn chrono_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Journal store plus fake renderer rooted at `dir`
pub fn registry(dir: &Path) -> Registry<JournalStore, FakeRenderer> {
    let store = JournalStore::open(dir).unwrap();
    Registry::new(store, FakeRenderer::new())
}
