use serde::{Deserialize, Serialize};

/// One city in a request or response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryItem {
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    5
}
