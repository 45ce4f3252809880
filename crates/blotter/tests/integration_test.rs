//! Integration tests for blotter.

use std::io::Write;
use tempfile::NamedTempFile;

use blotter::{
    BlotterError, Profiler, ProvisioningPlan, SqlType, TypePlanner, distinct_counts,
    max_value_lengths,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// A small slice of the crime-report dataset.
const CRIME_CSV: &str = "\
incident_number,offense_code,description,date,day_of_the_week,lat,long
1,619,LARCENY ALL OTHERS,2018-09-02,Sunday,42.35779134,-71.13937053
2,1402,VANDALISM,2018-08-21,Tuesday,42.30682138,-71.06030035
3,3410,TOWED MOTOR VEHICLE,2018-09-03,Monday,42.34658879,-71.07242943
4,3114,INVESTIGATE PROPERTY,2018-09-03,Monday,42.33418175,-71.07866441
5,3114,INVESTIGATE PROPERTY,2018-09-03,Monday,42.27536542,-71.09036101
";

// =============================================================================
// Profiling Tests
// =============================================================================

#[test]
fn test_profile_crime_file() {
    let file = create_test_file(CRIME_CSV);

    let profile = Profiler::new()
        .profile_file(file.path())
        .expect("Profiling failed");

    assert_eq!(profile.source.row_count, 5);
    assert_eq!(profile.source.column_count, 7);
    assert_eq!(profile.source.format, "csv");
    assert!(profile.source.hash.starts_with("sha256:"));

    let incident = profile.column("incident_number").unwrap();
    assert_eq!(incident.distinct_count, 5);
    assert!(incident.is_unique(profile.row_count()));

    let code = profile.column("offense_code").unwrap();
    assert_eq!(code.distinct_count, 4);

    let day = profile.column("day_of_the_week").unwrap();
    assert_eq!(day.distinct_count, 3);
    assert_eq!(day.max_length, Some(7));

    let description = profile.column("description").unwrap();
    assert_eq!(description.max_length, Some("INVESTIGATE PROPERTY".len()));
}

#[test]
fn test_profile_is_a_pure_function_of_the_file() {
    let file = create_test_file(CRIME_CSV);
    let profiler = Profiler::new();

    let first = profiler.distinct_values_in_file(file.path(), 4).unwrap();
    let second = profiler.distinct_values_in_file(file.path(), 4).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_counts_and_lengths_on_small_table() {
    let file = create_test_file("a,b\n1,xx\n2,x\n1,y\n");
    let profile = Profiler::new().profile_file(file.path()).unwrap();

    assert_eq!(profile.column("a").unwrap().distinct_count, 2);
    assert_eq!(profile.column("b").unwrap().distinct_count, 3);
    assert_eq!(profile.column("b").unwrap().max_length, Some(2));
}

#[test]
fn test_header_only_file_has_empty_value_sets() {
    let file = create_test_file("incident_number,offense_code\n");
    let profiler = Profiler::new();

    let profile = profiler.profile_file(file.path()).unwrap();
    assert_eq!(profile.source.row_count, 0);
    for column in &profile.columns {
        assert_eq!(column.distinct_count, 0);
        assert_eq!(column.max_length, None);
    }

    assert!(
        profiler
            .distinct_values_in_file(file.path(), 0)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_out_of_range_column_is_an_error() {
    let file = create_test_file(CRIME_CSV);

    let err = Profiler::new()
        .distinct_values_in_file(file.path(), 7)
        .unwrap_err();

    assert!(matches!(
        err,
        BlotterError::ColumnOutOfRange { column: 7, .. }
    ));
}

#[test]
fn test_newline_delimiter_is_rejected() {
    let file = create_test_file("a,b\n1,2\n");
    let parser = blotter::Parser::with_config(blotter::ParserConfig {
        delimiter: Some(b'\n'),
        ..Default::default()
    });

    assert!(matches!(
        parser.parse_file(file.path()),
        Err(BlotterError::InvalidDelimiter(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = Profiler::new()
        .profile_file("/nonexistent/boston.csv")
        .unwrap_err();

    assert!(matches!(err, BlotterError::Io { .. }));
}

#[test]
fn test_batched_operations_preserve_header_order() {
    let file = create_test_file(CRIME_CSV);
    let parser = blotter::Parser::new();
    let (table, _) = parser.parse_file(file.path()).unwrap();

    let counts = distinct_counts(&table).unwrap();
    let names: Vec<&str> = counts.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "incident_number",
            "offense_code",
            "description",
            "date",
            "day_of_the_week",
            "lat",
            "long"
        ]
    );

    let lengths = max_value_lengths(&table).unwrap();
    assert_eq!(lengths[0], ("incident_number".to_string(), 1));
}

// =============================================================================
// Type Planning Tests
// =============================================================================

#[test]
fn test_planned_types_for_crime_columns() {
    let file = create_test_file(CRIME_CSV);
    let profile = Profiler::new().profile_file(file.path()).unwrap();
    let plans = TypePlanner::new().plan_table(&profile);

    let by_name = |name: &str| {
        plans
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("no plan for {name}"))
    };

    assert_eq!(by_name("incident_number").sql_type, SqlType::SmallInt);
    assert_eq!(by_name("offense_code").sql_type, SqlType::SmallInt);
    assert_eq!(by_name("date").sql_type, SqlType::Date);
    assert_eq!(
        by_name("lat").sql_type,
        SqlType::Decimal {
            precision: 10,
            scale: 8
        }
    );
    assert!(matches!(
        by_name("day_of_the_week").sql_type,
        SqlType::Enum { .. }
    ));
    assert!(by_name("incident_number").unique);
}

// =============================================================================
// Provisioning Plan Tests
// =============================================================================

#[test]
fn test_plan_derived_from_profile() {
    let file = create_test_file(CRIME_CSV);
    let profile = Profiler::new().profile_file(file.path()).unwrap();

    let plan = ProvisioningPlan::from_profile(
        "crime_db",
        "crimes",
        "boston_crimes",
        &profile,
        &TypePlanner::new(),
    );

    // First column is all-distinct and never empty, so it becomes the key.
    assert!(plan.table.column("incident_number").unwrap().primary_key);
    assert!(plan.undefined_enum_types().is_empty());

    let script = plan.script();
    assert!(script.contains("CREATE DATABASE crime_db;"));
    assert!(script.contains("CREATE SCHEMA crimes;"));
    assert!(script.contains("CREATE TABLE crimes.boston_crimes ("));
}

#[test]
fn test_builtin_plan_renders_full_sequence() {
    let script = ProvisioningPlan::crime_reports()
        .with_password("data_analyst", "secret1")
        .with_password("data_scientist", "secret2")
        .script();

    for expected in [
        "CREATE DATABASE crime_db;",
        "CREATE SCHEMA crimes;",
        "CREATE TYPE weekday AS ENUM",
        "CREATE TABLE crimes.boston_crimes (",
        "REVOKE ALL ON SCHEMA public FROM public;",
        "CREATE ROLE readonly NOLOGIN;",
        "CREATE ROLE readwrite NOLOGIN;",
        "GRANT CONNECT ON DATABASE crime_db TO readonly;",
        "GRANT SELECT ON ALL TABLES IN SCHEMA crimes TO readonly;",
        "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA crimes TO readwrite;",
        "CREATE USER data_analyst WITH PASSWORD 'secret1';",
        "GRANT readonly TO data_analyst;",
        "CREATE USER data_scientist WITH PASSWORD 'secret2';",
        "GRANT readwrite TO data_scientist;",
    ] {
        assert!(script.contains(expected), "script missing: {expected}");
    }
}
