use std::io::Cursor;

use area_stats::StatsError;
use area_stats::ingestion::{
    ColumnMapping, ImportFilters, ImportOptions, ImportRequest, SourceColumn, SourceFormat, YearRange,
    datasets, import_dataset, import_from_path, populate, populate_unfiltered,
};
use area_stats::model::AreaStore;

const FIXTURES: &str = "tests/fixtures";

#[test]
fn names_and_values_from_separate_files_merge() {
    let mut store = AreaStore::new();
    let opts = ImportOptions::default();
    import_dataset(&mut store, FIXTURES, &datasets::areas(), &opts).unwrap();
    import_dataset(&mut store, FIXTURES, &datasets::find("complete-pop").unwrap(), &opts).unwrap();
    import_dataset(&mut store, FIXTURES, &datasets::find("popden").unwrap(), &opts).unwrap();

    assert_eq!(store.len(), 3);
    let swansea = store.area("W06000011").unwrap();
    assert_eq!(swansea.name("eng").unwrap(), "Swansea");
    assert_eq!(swansea.name("cym").unwrap(), "Abertawe");

    // the JSON import came last, so its label and its 2015 reading win.
    let pop = swansea.measure("pop").unwrap();
    assert_eq!(pop.label(), "Population");
    assert_eq!(pop.len(), 4);
    assert_eq!(pop.value(2015).unwrap(), 242316.0);
    assert_eq!(swansea.measure("dens").unwrap().len(), 2);
}

#[test]
fn filters_apply_across_formats() {
    let mut store = AreaStore::new();
    let opts = ImportOptions {
        filters: ImportFilters::all()
            .with_areas(["W06000023"])
            .with_measures(["pop", "area"])
            .with_years(YearRange::new(2015, 2016)),
        ..Default::default()
    };
    import_dataset(&mut store, FIXTURES, &datasets::areas(), &opts).unwrap();
    import_dataset(&mut store, FIXTURES, &datasets::find("complete-pop").unwrap(), &opts).unwrap();
    import_dataset(&mut store, FIXTURES, &datasets::find("popden").unwrap(), &opts).unwrap();

    assert_eq!(store.len(), 1);
    let powys = store.area("W06000023").unwrap();
    assert_eq!(powys.name("eng").unwrap(), "Powys");
    assert!(powys.measure("dens").is_err());
    assert_eq!(powys.measure("pop").unwrap().len(), 2);
    assert_eq!(
        powys.measure("area").unwrap().readings().collect::<Vec<_>>(),
        vec![(2015, 5181.0)]
    );
}

#[test]
fn populate_checks_mapping_length_before_reading() {
    let mut store = AreaStore::new();
    let short = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "Localauthority_Code")
        .with(SourceColumn::Year, "Year_Code");
    let err = populate(
        &mut store,
        Cursor::new("not json at all"),
        SourceFormat::StatsJson,
        &short,
        &ImportFilters::all(),
    )
    .unwrap_err();
    assert!(matches!(err, StatsError::Structural { .. }), "{err}");
    assert!(store.is_empty());
}

#[test]
fn unfiltered_import_only_accepts_area_names() {
    let mut store = AreaStore::new();
    let pop = datasets::find("complete-pop").unwrap();
    let err = populate_unfiltered(&mut store, Cursor::new("AuthorityCode,2015\n"), pop.format, &pop.columns)
        .unwrap_err();
    assert!(err.to_string().contains("unexpected data type"), "{err}");

    let err = "xlsx".parse::<SourceFormat>().unwrap_err();
    assert!(err.to_string().contains("unexpected data type 'xlsx'"));
    assert_eq!("STATS-JSON".parse::<SourceFormat>().unwrap(), SourceFormat::StatsJson);
}

#[test]
fn missing_file_is_stream_error() {
    let mut store = AreaStore::new();
    let areas = datasets::areas();
    let err = import_from_path(
        &mut store,
        "tests/fixtures/does_not_exist.csv",
        areas.format,
        &areas.columns,
        &ImportOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, StatsError::Stream(_)), "{err}");
}

#[test]
fn import_request_runs_like_import_from_path() {
    let trains = datasets::find("trains").unwrap();
    let req = ImportRequest {
        path: format!("{FIXTURES}/{}", trains.file).into(),
        format: trains.format,
        columns: trains.columns.clone(),
        options: ImportOptions::default(),
    };
    let mut store = AreaStore::new();
    let stats = req.run(&mut store).unwrap();
    assert_eq!(stats.records, 3);
    assert_eq!(store.area("W06000011").unwrap().measure("rail").unwrap().len(), 1);
}

#[test]
fn exported_json_reloads() {
    let mut store = AreaStore::new();
    let opts = ImportOptions::default();
    import_dataset(&mut store, FIXTURES, &datasets::areas(), &opts).unwrap();
    import_dataset(&mut store, FIXTURES, &datasets::find("popden").unwrap(), &opts).unwrap();

    let json = store.to_json().unwrap();
    let reloaded = AreaStore::from_json(&json).unwrap();
    assert_eq!(reloaded.to_json().unwrap(), json);
    assert_eq!(
        reloaded.area("W06000011").unwrap().measure("dens").unwrap().value(2016).unwrap(),
        568.5
    );
}

#[test]
fn text_output_lists_every_area() {
    let mut store = AreaStore::new();
    let opts = ImportOptions::default();
    import_dataset(&mut store, FIXTURES, &datasets::areas(), &opts).unwrap();
    import_dataset(&mut store, FIXTURES, &datasets::find("complete-pop").unwrap(), &opts).unwrap();

    let text = store.to_string();
    assert!(text.contains("Swansea / Abertawe (W06000011)"));
    assert!(text.contains("Newport / Casnewydd (W06000022)"));
    assert!(text.contains("Population (pop)"));
    assert_eq!(text.matches("Average").count(), 3);
}
