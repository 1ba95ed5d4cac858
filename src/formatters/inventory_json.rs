use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::audit::Inventory;

/// Pretty-printed JSON of the function inventory, keyed by relative path.
pub struct InventoryJsonFormatter;

impl InventoryJsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, inventory: &Inventory, output_path: &Path) -> Result<()> {
        let json_content = self.format_inventory(inventory)?;
        fs::write(output_path, json_content)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_inventory(&self, inventory: &Inventory) -> Result<String> {
        Ok(serde_json::to_string_pretty(inventory)?)
    }
}

impl Default for InventoryJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
