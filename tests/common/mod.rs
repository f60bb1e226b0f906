//! Common test utilities for integration tests

use std::fs;
use std::path::Path;

/// Helper function to create a test input file in a directory
#[allow(dead_code)]
pub fn create_test_file(path: &Path, content: &str) {
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    fs::write(path, content).unwrap();
}

/// Returns the message part of every line in a progress log
#[allow(dead_code)]
pub fn log_messages(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split_once(',').unwrap().1.to_string())
        .collect()
}

/// Sample CSV with a single listing
#[allow(dead_code)]
pub const SAMPLE_CSV: &str = "car_model,year_of_manufacture,price,fuel
Civic,2019,15499.999,Petrol
";

/// Sample JSON Lines file with a single listing
#[allow(dead_code)]
pub const SAMPLE_JSON: &str = r#"{"car_model":"Model3","year_of_manufacture":2021,"price":35200.004,"fuel":"Electric"}
"#;

/// Sample XML with one complete entry and one entry missing its price
#[allow(dead_code)]
pub const SAMPLE_XML: &str = r#"<?xml version="1.0"?>
<data>
  <row>
    <model>Corolla</model>
    <year_of_manufacture>2018</year_of_manufacture>
    <price>12000.456</price>
    <fuel>Petrol</fuel>
  </row>
  <row>
    <model>Focus</model>
    <year_of_manufacture>2016</year_of_manufacture>
    <fuel>Diesel</fuel>
  </row>
</data>"#;

/// XML document that is not well-formed
#[allow(dead_code)]
pub const MALFORMED_XML: &str = r#"<?xml version="1.0"?>
<data>
  <row>
    <model>Broken</price>
  </row>
</data>"#;

/// Progress messages of a successful run, in order
#[allow(dead_code)]
pub const FULL_RUN_LOG: &[&str] = &[
    "ETL Job Started",
    "Extract phase Started",
    "Extract phase Ended",
    "Transform phase Started",
    "Transform phase Ended",
    "Load phase Started",
    "Load phase Ended",
    "ETL Job Ended",
];
