use crate::domain::conversion::RateTable;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Everything the desk is configured with: collaborator credentials,
/// the fixed recipient label, and the directed rate pair. Injected at
/// construction so the core itself embeds no secrets or rates.
#[derive(Debug, Clone, Deserialize)]
pub struct DeskConfig {
    pub media_host_namespace: String,
    pub media_host_preset: String,
    pub notifier_service_id: String,
    pub notifier_template_id: String,
    pub notifier_key: String,
    pub recipient_label: String,
    pub base_unit: String,
    pub quote_unit: String,
    pub rate_base_to_quote: Decimal,
    pub rate_quote_to_base: Decimal,
}

impl DeskConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn rate_table(&self) -> RateTable {
        RateTable::new(
            self.base_unit.clone(),
            self.quote_unit.clone(),
            self.rate_base_to_quote,
            self.rate_quote_to_base,
        )
    }
}
