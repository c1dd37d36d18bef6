use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Envelope of every `Account/user_data_exports/*.json` file.
///
/// Records stay untyped: each section declares its own columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataExportEnvelope {
    #[serde(deserialize_with = "lenient::string")]
    pub section: String,
    #[serde(deserialize_with = "lenient::string")]
    pub generated_at: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub record_count: u64,
    pub metadata: Option<ExportMetadata>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub records: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportMetadata {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schema_name: String,
    pub schema_description: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub columns: Vec<ExportColumn>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportColumn {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub description: Option<String>,
}
