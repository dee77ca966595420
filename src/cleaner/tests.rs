use super::*;
use std::io::Cursor;

const SAMPLE_EXPORT: &str = "#group,false,false,false,true,false
,result,table,_time,device_id,analogInput_3
,_result,0,2024-07-11T00:00:02Z,563672,2000
,_result,0,2024-07-11T00:00:00Z,563672,1000
,_result,0,not-a-time,563672,5000
,_result,0,2024-07-11T00:00:01Z,123761,3600000
,_result,0,2024-07-11T00:00:04Z,563672,
";

#[test]
fn test_clean_all_devices() {
    let table = DataCleaner::default()
        .clean(Cursor::new(SAMPLE_EXPORT))
        .unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(table.dropped_rows(), 1);

    let powers: Vec<f64> = table.records().iter().map(|r| r.power_w).collect();
    assert_eq!(powers, vec![1.0, 3600.0, 2.0, 0.0]);

    let energies: Vec<f64> = table.records().iter().filter_map(|r| r.energy_wh).collect();
    assert_eq!(energies[0], 0.0);
    assert_eq!(energies[1], 1.0);
    assert!((energies[2] - 2.0 / 3600.0).abs() < 1e-12);
    assert_eq!(energies[3], 0.0);

    assert_eq!(table.records()[1].device_id.as_deref(), Some("123761"));
}

#[test]
fn test_energy_keeps_sub_millisecond_spacing() {
    let export = "_time,analogInput_3
2024-07-11T00:00:00.000000000Z,3600000
2024-07-11T00:00:00.000250000Z,3600000
2024-07-11T00:00:00.000750500Z,3600000
";
    let table = DataCleaner::default().clean(Cursor::new(export)).unwrap();

    let energies: Vec<f64> = table.records().iter().filter_map(|r| r.energy_wh).collect();
    assert_eq!(energies[0], 0.0);
    assert!((energies[1] - 0.000_25).abs() < 1e-15);
    assert!((energies[2] - 0.000_500_5).abs() < 1e-15);
}

#[test]
fn test_clean_single_device() {
    let config = CleanerConfig {
        device_id: Some("563672".to_string()),
        ..Default::default()
    };
    let table = DataCleaner::new(config).clean(Cursor::new(SAMPLE_EXPORT)).unwrap();

    assert_eq!(table.len(), 3);
    let energies: Vec<f64> = table.records().iter().filter_map(|r| r.energy_wh).collect();
    assert!((energies[1] - 4.0 / 3600.0).abs() < 1e-12);
    assert!((table.total_energy_wh().unwrap() - 4.0 / 3600.0).abs() < 1e-12);
}

#[test]
fn test_write_csv_without_energy() {
    let config = CleanerConfig {
        device_id: Some("563672".to_string()),
        calc_energy: false,
        ..Default::default()
    };
    let table = DataCleaner::new(config).clean(Cursor::new(SAMPLE_EXPORT)).unwrap();
    assert_eq!(table.total_energy_wh(), None);

    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Time,Power\n2024-07-11 00:00:00,1\n2024-07-11 00:00:02,2\n2024-07-11 00:00:04,0\n"
    );
}

#[test]
fn test_write_csv_with_energy_header() {
    let table = DataCleaner::default().clean(Cursor::new(SAMPLE_EXPORT)).unwrap();

    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Time,Power,Energy\n2024-07-11 00:00:00,1,0\n"));
}

#[test]
fn test_to_trace() {
    let table = DataCleaner::default().clean(Cursor::new(SAMPLE_EXPORT)).unwrap();
    let trace = table.to_trace("Kettle").unwrap();

    assert_eq!(trace.name(), Some("Kettle"));
    assert_eq!(trace.len(), 4);
    assert_eq!(trace.timestamps()[0], 1720656000.0);
    assert_eq!(trace.timestamps()[3], 1720656004.0);
    assert_eq!(trace.readings()[1], 3600.0);
}

#[test]
fn test_missing_columns() {
    let export = "_time,value\n2024-07-11T00:00:00Z,1000\n";
    let err = DataCleaner::default().clean(Cursor::new(export)).unwrap_err();
    assert!(matches!(err, CleanerError::MissingColumn(ref c) if c == "analogInput_3"));

    let export = "_time,analogInput_3\n2024-07-11T00:00:00Z,1000\n";
    let config = CleanerConfig {
        device_id: Some("1".to_string()),
        ..Default::default()
    };
    let err = DataCleaner::new(config).clean(Cursor::new(export)).unwrap_err();
    assert!(matches!(err, CleanerError::MissingColumn(ref c) if c == "device_id"));
}

#[test]
fn test_parse_time_layouts() {
    assert!(parse_time("2024-07-11T00:56:55.579801399Z").is_some());
    assert!(parse_time("2024-07-11 00:56:55").is_some());
    assert!(parse_time("2024-07-11T00:56:55").is_some());
    assert!(parse_time("").is_none());
    assert!(parse_time("yesterday").is_none());
}
