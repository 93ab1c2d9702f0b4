//! List bundled modules.

use anyhow::Result;
use vellum_content::{bundle, load_page, INDEX_PAGE};
use vellum_modules::ModuleRegistry;

/// Run the modules command.
pub fn run() -> Result<()> {
    let mut registry = bundle()?;
    load_page(&mut registry, INDEX_PAGE)?;

    for line in describe(&registry) {
        println!("{}", line);
    }

    Ok(())
}

/// One `key  state` line per module, in registration order.
fn describe(registry: &ModuleRegistry) -> Vec<String> {
    let width = registry
        .keys()
        .iter()
        .map(|key| key.to_string().len())
        .max()
        .unwrap_or(0);

    registry
        .keys()
        .iter()
        .filter_map(|key| {
            registry
                .state(key)
                .map(|state| format!("{:<width$}  {}", key.to_string(), state, width = width))
        })
        .collect()
}
