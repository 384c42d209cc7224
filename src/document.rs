use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A unit of extracted text, usually one PDF page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), metadata: Map::new() }
    }

    pub fn with_metadata(content: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self { content: content.into(), metadata }
    }

    /// Same metadata, new content.
    pub(crate) fn replace_content(&self, content: String) -> Self {
        Self { content, metadata: self.metadata.clone() }
    }
}

/// Receives short human-readable messages about removals.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Collects every message, in order.
impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _message: &str) {}
}
