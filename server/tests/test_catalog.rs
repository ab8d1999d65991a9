use colony::structures::StructureCatalog;
use server::load_catalog;
use std::fs;
use std::path::PathBuf;

fn schematics_directory(name: &str) -> PathBuf {
    let directory = std::env::temp_dir().join(format!("colony-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&directory);
    fs::create_dir_all(directory.join("wooden")).unwrap();
    fs::create_dir_all(directory.join("classic")).unwrap();
    fs::write(directory.join("wooden/townhall1.blueprint"), "townhall blocks").unwrap();
    fs::write(directory.join("classic/builder1.blueprint"), "builder blocks").unwrap();
    fs::write(directory.join("README"), "not a style").unwrap();
    directory
}

#[test]
fn test_schematics_registered_by_style_and_name() {
    let directory = schematics_directory("catalog");

    let catalog = load_catalog(&directory).unwrap();
    fs::remove_dir_all(&directory).unwrap();

    assert_eq!(catalog.len(), 2);
    assert!(catalog.contains("schematics/wooden/townhall1"));
    assert_eq!(
        catalog.hash_of("schematics/classic/builder1"),
        Some(StructureCatalog::content_hash(b"builder blocks").as_str())
    );
}

#[test]
fn test_missing_directory() {
    let directory = std::env::temp_dir().join("colony-schematics-missing");

    assert!(load_catalog(&directory).is_err());
}
