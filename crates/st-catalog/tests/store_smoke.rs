use st_catalog::*;

fn sample() -> Catalog {
    let mut cat = Catalog::new(
        "mdwarfs",
        vec!["GJ 832".to_string(), "GJ 876".to_string()],
        vec!["dist".to_string()],
    );
    cat.add_ref_entry("gaia18", "Gaia Collaboration 2018, A&A 616, A1");
    cat.set(
        "GJ 832",
        "dist",
        CatalogEntry {
            value: Some(4.97),
            err_pos: Some(0.02),
            err_neg: Some(0.02),
            reference: Some("gaia18".to_string()),
        },
    )
    .unwrap();
    cat
}

#[test]
fn save_and_load_catalog() {
    let dir = std::env::temp_dir().join("st_catalog_test");
    let _ = std::fs::remove_dir_all(&dir);

    let store = CatalogStore::new(dir.clone()).unwrap();
    assert!(!store.exists());

    let cat = sample();
    store.save(&cat).unwrap();
    assert!(store.exists());

    let loaded = store.load().unwrap();
    assert_eq!(loaded, cat);
}

#[test]
fn missing_catalog_is_not_found() {
    let dir = std::env::temp_dir().join("st_catalog_test_missing");
    let _ = std::fs::remove_dir_all(&dir);

    let store = CatalogStore::new(dir).unwrap();
    assert!(matches!(store.load(), Err(CatalogError::NotFound { .. })));
}

#[test]
fn lock_reports_the_other_holder() {
    let dir = std::env::temp_dir().join("st_catalog_test_lock");
    let _ = std::fs::remove_dir_all(&dir);

    let store = CatalogStore::new(dir).unwrap();
    assert_eq!(store.lock_owner().unwrap(), None);
    assert_eq!(store.lock("parke").unwrap(), None);
    assert_eq!(store.lock("parke").unwrap(), None);
    assert_eq!(store.lock("kevin").unwrap(), Some("parke".to_string()));
    assert_eq!(store.lock_owner().unwrap(), Some("parke".to_string()));

    store.unlock().unwrap();
    assert_eq!(store.lock("kevin").unwrap(), None);
}

#[test]
fn quick_entry_reads_one_cell() {
    let dir = std::env::temp_dir().join("st_catalog_test_quick");
    let _ = std::fs::remove_dir_all(&dir);

    let store = CatalogStore::new(dir).unwrap();
    store.save(&sample()).unwrap();

    let e = store.quick_entry("GJ 832", "dist").unwrap();
    assert_eq!(e.value, Some(4.97));
    assert!(matches!(
        store.quick_entry("GJ 1214", "dist"),
        Err(CatalogError::UnknownRow { .. })
    ));
}

#[test]
fn ragged_persisted_catalog_is_rejected() {
    let dir = std::env::temp_dir().join("st_catalog_test_ragged");
    let _ = std::fs::remove_dir_all(&dir);

    let store = CatalogStore::new(dir.clone()).unwrap();
    // Hand-edited file declaring 2 x 2 but holding 1 x 1 tables.
    let json = r#"{
        "name": "bad",
        "index": ["r1", "r2"],
        "columns": ["c1", "c2"],
        "values": [[null]],
        "err_pos": [[null]],
        "err_neg": [[null]],
        "refs": [[null]]
    }"#;
    std::fs::write(dir.join("catalog.json"), json).unwrap();

    assert!(matches!(
        store.load(),
        Err(CatalogError::Malformed { .. })
    ));
}

#[test]
fn backup_skips_unchanged_content() {
    let dir = std::env::temp_dir().join("st_catalog_test_backup");
    let _ = std::fs::remove_dir_all(&dir);

    let store = CatalogStore::new(dir).unwrap();
    let mut cat = sample();

    let first = store.backup(&cat).unwrap();
    assert!(first.is_some());
    assert_eq!(store.backup(&cat).unwrap(), None);

    std::thread::sleep(std::time::Duration::from_millis(5));
    cat.add_row("GJ 1214");
    let second = store.backup(&cat).unwrap();
    assert!(second.is_some());

    let stamps = store.list_archives().unwrap();
    assert_eq!(stamps.len(), 2);
    let archived = store.load_archive(&stamps[0]).unwrap();
    assert_eq!(archived.nrows(), 2);
}
