use serde::{Deserialize, Serialize};

use crate::model::ExtensionRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// `None` marks activation: build the list, show everything.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultDto {
    pub id: String,
    pub location: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub results: Vec<ResultDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchResponse {
    pub launched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Query(QueryRequest),
    Launch(LaunchRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Query(QueryResponse),
    Launch(LaunchResponse),
}

impl From<ExtensionRecord> for ResultDto {
    fn from(value: ExtensionRecord) -> Self {
        Self {
            id: value.id,
            location: value.location.as_str().to_string(),
            name: value.name,
            description: value.description,
        }
    }
}
