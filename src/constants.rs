// Default file locations, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "transformed_data.csv";
pub const DEFAULT_LOG_FILE: &str = "etl_log_file.txt";

// Canonical columns
pub const COL_CAR_MODEL: &str = "car_model";
pub const COL_YEAR: &str = "year_of_manufacture";
pub const COL_PRICE: &str = "price";
pub const COL_FUEL: &str = "fuel";
pub const CANONICAL_COLUMNS: &[&str] = &[COL_CAR_MODEL, COL_YEAR, COL_PRICE, COL_FUEL];

// XML entry children
pub const XML_MODEL_TAG: &[u8] = b"model";
pub const XML_YEAR_TAG: &[u8] = b"year_of_manufacture";
pub const XML_PRICE_TAG: &[u8] = b"price";
pub const XML_FUEL_TAG: &[u8] = b"fuel";

// Progress log
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";
pub const MSG_JOB_STARTED: &str = "ETL Job Started";
pub const MSG_EXTRACT_STARTED: &str = "Extract phase Started";
pub const MSG_EXTRACT_ENDED: &str = "Extract phase Ended";
pub const MSG_TRANSFORM_STARTED: &str = "Transform phase Started";
pub const MSG_TRANSFORM_ENDED: &str = "Transform phase Ended";
pub const MSG_LOAD_STARTED: &str = "Load phase Started";
pub const MSG_LOAD_ENDED: &str = "Load phase Ended";
pub const MSG_JOB_ENDED: &str = "ETL Job Ended";
