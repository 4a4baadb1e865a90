//! The `list` command: show the extension catalog.

use pgbox_catalog::Catalog;
use serde::Serialize;

use crate::error::Result;

/// One catalog entry in listing form.
#[derive(Debug, Serialize)]
pub struct ExtensionListing {
    pub name: String,
    pub description: String,
    /// Resolved for PG 17 as a representative version; `null` for
    /// contrib extensions.
    pub package: Option<String>,
    pub preload: bool,
}

/// Build the sorted listing of all catalog entries.
pub fn listings(catalog: &Catalog) -> Vec<ExtensionListing> {
    catalog
        .names()
        .into_iter()
        .filter_map(|name| catalog.get(name))
        .map(|desc| ExtensionListing {
            name: desc.name.to_string(),
            description: desc.description.to_string(),
            package: desc.resolved_package("17"),
            preload: !desc.preload.is_empty(),
        })
        .collect()
}

/// Print the catalog, as a table or as JSON.
pub fn run_list(catalog: &Catalog, json: bool) -> Result<()> {
    let entries = listings(catalog);
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in entries {
        println!("{:width$}  {}", entry.name, entry.description);
    }
    Ok(())
}
