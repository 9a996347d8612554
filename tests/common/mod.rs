//! Shared fixtures for integration tests.

#![allow(dead_code)]

use voter_roll_search::{CorpusStore, MatchEngine, VoterRecord};

/// A small mixed-script roll.
pub fn sample_voters() -> Vec<VoterRecord> {
    vec![
        VoterRecord::new("ABC1234567")
            .with_name_latin("Ravi Kumar")
            .with_name_local("രവി കുമാർ")
            .with_relative("Gopalan Nair", "ഗോപാലൻ നായർ", "Father's Name")
            .with_house_number("12"),
        VoterRecord::new("ABC1239876")
            .with_name_latin("Sita Devi")
            .with_name_local("സീത ദേവി")
            .with_relative("Ravi Kumar", "രവി കുമാർ", "Husband's Name")
            .with_house_number("12"),
        VoterRecord::new("KLA0456789")
            .with_name_latin("Mohanan Pillai")
            .with_name_local("മോഹനൻ പിള്ള")
            .with_house_number("7/2"),
        VoterRecord::new("XYZ9999999")
            .with_name_latin("Anitha Raveendran")
            .with_house_number("142"),
        VoterRecord::new("XYZ0000001").with_name_local("ലക്ഷ്മി"),
    ]
}

/// Engine over [`sample_voters`].
pub fn sample_engine() -> MatchEngine {
    engine_for(sample_voters())
}

pub fn engine_for(records: Vec<VoterRecord>) -> MatchEngine {
    MatchEngine::new(CorpusStore::from_records(records).expect("fixture corpus is non-empty"))
}

/// Snapshot JSON in the extractor's output format.
pub fn snapshot_json() -> &'static str {
    r#"{
        "voters": [
            {
                "serial_no": 1,
                "voter_id": "ABC1234567",
                "name_ml": "രവി കുമാർ",
                "name_en": "Ravi Kumar",
                "relative_name_ml": "ഗോപാലൻ",
                "relative_name_en": "Gopalan",
                "relation_type": "Father's Name",
                "house_number": "12",
                "age": 45,
                "gender": "Male / പുരുഷൻ",
                "pdf_source": "ward_01.pdf"
            },
            {
                "serial_no": "2",
                "voter_id": "ABC1239876",
                "name_ml": "സീത",
                "name_en": null,
                "relative_name_ml": null,
                "relative_name_en": null,
                "relation_type": null,
                "house_number": null,
                "age": null,
                "gender": "Female / സ്ത്രീ"
            }
        ],
        "metadata": {
            "pdfs_processed": ["ward_01.pdf"],
            "extracted_at": "2025-11-20T10:15:00",
            "total_voters": 2
        }
    }"#
}
