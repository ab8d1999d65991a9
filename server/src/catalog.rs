use colony::structures::StructureCatalog;
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Registers `<style>/<schematic><level>` files of directory as
/// `schematics/<style>/<schematic><level>` structures.
pub fn load_catalog(directory: &Path) -> Result<StructureCatalog, std::io::Error> {
    let mut catalog = StructureCatalog::default();
    for style in fs::read_dir(directory)? {
        let style = style?;
        if !style.file_type()?.is_dir() {
            continue;
        }
        let style_name = style.file_name().to_string_lossy().to_string();
        for schematic in fs::read_dir(style.path())? {
            let schematic = schematic?;
            let path = schematic.path();
            let stem = match path.file_stem() {
                Some(stem) if path.is_file() => stem.to_string_lossy().to_string(),
                _ => {
                    warn!("Skip schematic entry {:?}", path);
                    continue;
                }
            };
            let content = fs::read(&path)?;
            let name = format!("schematics/{}/{}", style_name, stem);
            catalog.register(&name, &content);
        }
    }
    info!(
        "Loaded {} structures from {:?}",
        catalog.len(),
        directory
    );
    Ok(catalog)
}
