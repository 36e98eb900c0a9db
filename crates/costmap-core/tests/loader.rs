use costmap_core::loader::{parse_boundaries, parse_rows};
use costmap_core::prelude::*;
use std::path::PathBuf;

const GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "ADMIN": "Canada", "ISO_A3": "CAN" },
      "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] } },
    { "type": "Feature", "properties": { "ADMIN": "Greenland" }, "geometry": null }
  ]
}"#;

const TABLE: &str = "\
Country,costIndex,incomeIndex,PPI,region,population,abbreviation
Canada,85,90,105.9,North America,\"38,250,000\",CA
France,80,70,87.5,Europe,67750000,fr
Atlantis,12,,x,Lost Continent,,
";

#[test]
fn table_with_optional_columns() {
    let rows = parse_rows(TABLE).unwrap();
    assert_eq!(rows.len(), 3);

    let canada = &rows[0];
    assert_eq!(canada.region, Some(Region::NorthAmerica));
    assert_eq!(canada.population, Some(38_250_000));
    assert_eq!(canada.flag_url().as_deref(), Some("https://flagcdn.com/w40/ca.png"));

    let atlantis = &rows[2];
    assert_eq!(atlantis.cost_index(), Some(12.0));
    assert_eq!(atlantis.income_index(), None);
    assert_eq!(atlantis.purchasing_power_index(), None);
    assert_eq!(atlantis.region, None);
    assert_eq!(atlantis.abbreviation, None);
}

#[test]
fn table_with_only_required_columns() {
    let rows = parse_rows("Country,costIndex,incomeIndex,PPI\nJapan,82.6,68.1,82.4\n").unwrap();
    assert_eq!(rows[0].region, None);
    assert_eq!(rows[0].indices, Indices::new(Some(82.6), Some(68.1), Some(82.4)));
}

#[test]
fn missing_required_column_is_named() {
    let err = parse_rows("Country,costIndex,incomeIndex\nJapan,82.6,68.1\n").unwrap_err();
    assert!(matches!(err, CostMapError::MissingColumn("PPI")));
}

#[test]
fn duplicate_country_in_table_is_rejected() {
    let err = parse_rows("Country,costIndex,incomeIndex,PPI\nChad,1,1,1\nChad,2,2,2\n").unwrap_err();
    assert!(matches!(err, CostMapError::DuplicateCountry(_)));
}

#[test]
fn boundaries_keep_admin_and_geometry() {
    let features = parse_boundaries(GEOJSON).unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].admin(), "Canada");
    assert!(features[0].geometry.contains("Polygon"));
    assert!(features[1].geometry.is_empty());
}

#[test]
fn boundaries_require_admin() {
    let err = parse_boundaries(
        r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"NAME":"X"},"geometry":null}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CostMapError::InvalidData(_)));

    let err = parse_boundaries(r#"{"type":"Feature","features":[]}"#).unwrap_err();
    assert!(matches!(err, CostMapError::InvalidData(_)));
}

#[test]
fn joined_features_export_as_geojson() {
    let ds = Dataset::from_texts(GEOJSON, TABLE).unwrap();
    let collection = costmap_core::model::to_feature_collection(ds.features()).unwrap();

    let canada = &collection["features"][0]["properties"];
    assert_eq!(canada["ADMIN"], "Canada");
    assert_eq!(canada["costIndex"], 85.0);
    assert_eq!(canada["PPI"], 105.9);
    let greenland = &collection["features"][1]["properties"];
    assert!(greenland.get("costIndex").is_none());
}

#[test]
fn default_dataset_loads_and_joins() {
    let ds = Dataset::load_default().unwrap();
    let stats = ds.stats();

    assert_eq!(stats.rows, 16);
    assert_eq!(stats.features, 18);
    assert_eq!(stats.matched, 15);
    assert_eq!(stats.unmatched, 3);
    assert_eq!(stats.complete_rows, 15);

    let report = ds.join_report();
    assert_eq!(report.unused_rows, vec!["Curacao".to_string()]);
    assert_eq!(report.near_misses.len(), 1);
    assert_eq!(report.near_misses[0].feature, "Curaçao");
}

#[test]
fn missing_file_makes_the_dataset_unavailable() {
    let dir = Dataset::default_data_dir();
    let err = Dataset::load(
        dir.join("does-not-exist.geojson"),
        dir.join(Dataset::default_table_filename()),
    )
    .unwrap_err();

    match err {
        CostMapError::Unavailable(reason) => assert!(reason.contains("boundaries"), "{reason}"),
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[cfg(feature = "snapshot")]
#[test]
fn snapshot_restores_the_joined_dataset() {
    let ds = Dataset::from_texts(GEOJSON, TABLE).unwrap();
    let path: PathBuf = std::env::temp_dir().join(format!(
        "costmap-snapshot-{}.bin",
        std::process::id()
    ));

    ds.save_snapshot(&path).unwrap();
    let restored = Dataset::load_snapshot(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(restored.unwrap(), ds);
}

#[cfg(feature = "snapshot")]
#[test]
fn cached_load_rebuilds_when_the_boundary_file_changes() {
    let dir = std::env::temp_dir().join(format!("costmap-cache-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let feature = |name: &str| {
        format!(r#"{{"type":"Feature","properties":{{"ADMIN":"{name}"}},"geometry":null}}"#)
    };
    let collection = |names: &[&str]| {
        let features: Vec<String> = names.iter().map(|n| feature(*n)).collect();
        format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
    };

    let (a, b, t) = (dir.join("a.geojson"), dir.join("b.geojson"), dir.join("t.csv"));
    std::fs::write(&a, collection(&["Canada"])).unwrap();
    std::fs::write(&b, collection(&["France", "Chad"])).unwrap();
    std::fs::write(&t, TABLE).unwrap();

    let admins = |ds: &Dataset| -> Vec<String> {
        ds.features().iter().map(|f| f.admin.clone()).collect()
    };

    let first = Dataset::load_cached(&a, &t).unwrap();
    let second = Dataset::load_cached(&b, &t).unwrap();
    let third = Dataset::load_cached(&b, &t).unwrap();
    let back = Dataset::load_cached(&a, &t).unwrap();
    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(admins(&first), ["Canada"]);
    assert_eq!(admins(&second), ["France", "Chad"]);
    assert_eq!(third, second);
    assert_eq!(admins(&back), ["Canada"]);
}
