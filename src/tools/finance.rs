use super::required_str;
use crate::client::ToolHandler;
use crate::types::tool::{ParameterType, ToolSchema};
use serde_json::{Map, Value};

pub const NAME: &str = "get_company_symbol";

const SYMBOLS: &[(&str, &str)] = &[
    ("Phidata", "PDTA"),
    ("Apple", "AAPL"),
    ("Amazon", "AMZN"),
    ("Google", "GOOGL"),
];

pub fn schema() -> ToolSchema {
    ToolSchema::new(NAME, "Use this function to get the symbol for a company.").param_described(
        "company",
        ParameterType::String,
        "The name of the company.",
    )
}

/// Ticker for a known company name, `"Unknown"` otherwise.
pub fn lookup_symbol(company: &str) -> &'static str {
    SYMBOLS
        .iter()
        .find(|(name, _)| *name == company)
        .map(|(_, symbol)| *symbol)
        .unwrap_or("Unknown")
}

pub struct CompanySymbol;

impl ToolHandler for CompanySymbol {
    fn call(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
        let company = required_str(args, "company")?;
        Ok(Value::String(lookup_symbol(company).to_string()))
    }
}
