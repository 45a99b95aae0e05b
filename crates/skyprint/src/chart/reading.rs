use serde::{Deserialize, Serialize};

/// One interpretive block of a reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub key: Option<String>,
    pub title: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub long: String,
    #[serde(default)]
    pub actions: Option<Vec<String>>,
}

impl Section {
    /// Actions worth listing; absent and empty lists both yield `None`.
    pub fn action_list(&self) -> Option<&[String]> {
        self.actions.as_deref().filter(|a| !a.is_empty())
    }
}

/// Reading assembled by the backend for a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: String,
    #[serde(default)]
    pub chart_id: Option<String>,
    #[serde(default)]
    pub signature: Vec<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
