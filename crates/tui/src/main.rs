mod reader;

use std::path::PathBuf;

use anyhow::{Context, Result};
use scrollspy_core::PageDoc;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: scrollspy <page.json>");
        eprintln!("       (try demos/sample-page.json)");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let data = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let page = PageDoc::from_json(&data).with_context(|| format!("parsing {}", path.display()))?;
    let tracker = page.tracker().context("building section registry")?;

    reader::run(&page, tracker)?;
    Ok(())
}
