use datamap::{Compound, DataError, Storage};

fn colony_compound(name: &str) -> Compound {
    let mut building = Compound::new();
    building.put_int("level", 2);
    building.put_int_array("residents", &[1, 4]);
    let mut compound = Compound::new();
    compound.put_string("name", name);
    compound.put_bool("manualHiring", true);
    compound.put_list("buildings", vec![building]);
    compound
}

#[test]
fn test_save_and_load_colony_compound() {
    let storage = Storage::open_in_memory().unwrap();
    let compound = colony_compound("Harbor");

    storage.save("colony:1", "Harbor", &compound).unwrap();
    let loaded = storage.load("colony:1").unwrap();

    assert_eq!(loaded, Some(compound));
}

#[test]
fn test_save_replaces_existing_row() {
    let storage = Storage::open_in_memory().unwrap();
    storage
        .save("colony:1", "Harbor", &colony_compound("Harbor"))
        .unwrap();
    storage
        .save("colony:1", "Harbor", &colony_compound("Bay"))
        .unwrap();

    let all = storage.load_all().unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].get_string("name").unwrap(), "Bay");
}

#[test]
fn test_delete_colony_row() {
    let storage = Storage::open_in_memory().unwrap();
    storage
        .save("colony:7", "Vale", &colony_compound("Vale"))
        .unwrap();

    assert!(storage.delete("colony:7").unwrap());
    assert!(!storage.delete("colony:7").unwrap());
    assert_eq!(storage.load("colony:7").unwrap(), None);
}

#[test]
fn test_nested_compound_access() {
    let compound = colony_compound("Harbor");

    let buildings = compound.get_list("buildings").unwrap();
    let residents = buildings[0].get_int_array("residents").unwrap();
    let missing = compound.get_int_array("freeBlocks").unwrap();

    assert_eq!(residents, vec![1, 4]);
    assert!(missing.is_empty());
    assert!(compound.get_bool("manualHiring").unwrap());
}

#[test]
fn test_typed_access_errors() {
    let compound = colony_compound("Harbor");

    let not_found = compound.get_int("maxCitizens");
    let mismatch = compound.get_int("name");

    assert!(matches!(not_found, Err(DataError::TagNotFound { .. })));
    assert!(matches!(mismatch, Err(DataError::TagMismatch { .. })));
}
