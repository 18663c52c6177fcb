use st_core::{Cell, Measurement};
use st_table::*;

#[test]
fn full_body_with_notes_and_compact_refs() {
    let data = TableData {
        cells: vec![
            vec![
                Cell::text("GJ 832"),
                Cell::from(Measurement::asymmetric(12.345, 0.6, 0.4)),
                Cell::from(Measurement::exact(0.00123)),
            ],
            vec![
                Cell::text("GJ 876"),
                Cell::from(Measurement::lower_limit(100.0)),
                Cell::from(Measurement::exact(42.0)),
            ],
        ],
        notes: Some(vec![
            vec![None, Some("saturated".to_string()), None],
            vec![None, None, Some("from SED fit".to_string())],
        ]),
        refkeys: Some(vec![
            vec![None, Some("loyd15".to_string()), None],
            vec![None, Some("france16,loyd15".to_string()), None],
        ]),
    };
    let spec = TableSpec {
        compact_refs: true,
        formats: vec![None, None, Some(".3g".parse().unwrap())],
        ..TableSpec::default()
    };

    let body = build_table(&data, &spec).unwrap();
    let expected = "\\startdata\n\
        GJ 832 & $12.3_{-0.6}^{+0.4}$\\tablenotemark{a} & 1 & $1.23\\sn{-3}$\\\\\n\
        GJ 876 & $> 1.0e+02$ & 2,1 & 42\\tablenotemark{b}\\\\\n\
        \\enddata\n\
        \n\
        \\tablenotetext{a}{saturated}\n\
        \\tablenotetext{b}{from SED fit}\n\
        \n\
        \\tablerefs{(1) \\citealt{loyd15}; (2) \\citealt{france16}}\n";
    assert_eq!(body, expected);
}

#[test]
fn write_table_round_trips_through_disk() {
    let dir = std::env::temp_dir().join("st_table_test");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("body.tex");

    let data = TableData::from_cells(vec![vec![Cell::from(Measurement::symmetric(5.0, 0.25))]]);
    let body = build_table(&data, &TableSpec::default()).unwrap();
    write_table(&path, &body).unwrap();

    let back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(back, body);
    assert!(back.contains("\\pm"));
}
