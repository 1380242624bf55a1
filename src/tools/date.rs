use crate::client::ToolHandler;
use crate::types::tool::ToolSchema;
use serde_json::{Map, Value};

pub const NAME: &str = "get_current_date";

pub fn schema() -> ToolSchema {
    ToolSchema::new(NAME, "Get the current date in YYYY-MM-DD format.")
}

/// Today's date on the local clock.
pub struct CurrentDate;

impl CurrentDate {
    pub fn today() -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }
}

impl ToolHandler for CurrentDate {
    fn call(&self, _args: &Map<String, Value>) -> anyhow::Result<Value> {
        Ok(Value::String(Self::today()))
    }
}
