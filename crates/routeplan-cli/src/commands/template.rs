//! Emit the CSV template documenting the expected import shape.

use std::path::Path;

use anyhow::{Context, Result};

use routeplan_csv::csv_template;

pub fn run(output: Option<&Path>) -> Result<()> {
    let template = csv_template()?;
    match output {
        Some(path) => {
            std::fs::write(path, template)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("template written to {}", path.display());
        }
        None => print!("{template}"),
    }
    Ok(())
}
