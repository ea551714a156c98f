use capacity_planner::core::cluster::HaPolicy;
use capacity_planner::extensions::batch::BatchRunner;
use capacity_planner::extensions::csv_inventory::read_inventory;
use capacity_planner::extensions::scenario::{Scenario, ScenarioError, ScenarioRaw, WorkloadConfig};

fn name_wrapper(file_name: &str) -> String {
    format!("test-configs/{}", file_name)
}

#[test]
// Entries with count > 1 expand into numbered instances; plain entries keep
// their id. Planner overrides apply on top of defaults.
fn test_scenario_count_expansion() {
    let scenario = Scenario::from_file(&name_wrapper("scenario.yaml")).unwrap();

    let cluster_ids: Vec<&str> = scenario.clusters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(cluster_ids, vec!["prod-1", "prod-2", "dr"]);
    assert_eq!(scenario.clusters[0].ha_policy, HaPolicy::N1);
    assert_eq!(scenario.clusters[0].cpu_overcommit_ratio, 4.);
    assert_eq!(scenario.clusters[2].cpu_overcommit_ratio, 1.);

    let item_ids: Vec<&str> = scenario.workload.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(item_ids, vec!["web-1", "web-2", "web-3", "db1"]);
    assert_eq!(scenario.workload[3].display_name, "Primary database");

    assert_eq!(scenario.config.algorithm, "FirstFit");
    assert_eq!(scenario.config.warning_utilization_pct, 80.);
}

#[test]
// An entry with both id and id_prefix is ambiguous and rejected.
fn test_scenario_rejects_ambiguous_entry() {
    let raw = ScenarioRaw {
        workload: Some(vec![WorkloadConfig {
            id: Some("vm1".to_string()),
            id_prefix: Some("vm-".to_string()),
            display_name: None,
            cpu_cores: 1,
            memory_gb: 1.,
            storage_gb: 1.,
            count: Some(2),
        }]),
        ..Default::default()
    };
    let result = Scenario::from_raw(raw, None);
    assert!(matches!(result, Err(ScenarioError::BadEntryId { .. })));
}

#[test]
// The referenced inventory CSV resolves relative to the scenario file.
fn test_scenario_with_csv_inventory() {
    let scenario = Scenario::from_file(&name_wrapper("scenario_csv.yaml")).unwrap();

    assert_eq!(scenario.workload.len(), 2);
    assert_eq!(scenario.workload[0].id, "vm-1");
    assert_eq!(scenario.workload[0].display_name, "Web frontend");
    assert_eq!(scenario.workload[0].cpu_cores, 4);
    assert_eq!(scenario.workload[1].memory_gb, 64.);
    assert_eq!(scenario.workload[1].storage_gb, 500.);
}

#[test]
fn test_read_inventory() {
    let items = read_inventory(&name_wrapper("inventory.csv")).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].id, "vm-2");
    assert_eq!(items[1].cpu_cores, 8);
}

#[test]
fn test_missing_files_are_reported() {
    assert!(Scenario::from_file(&name_wrapper("no_such_scenario.yaml")).is_err());
    assert!(read_inventory(&name_wrapper("no_such_inventory.csv")).is_err());
}

#[test]
// Scenarios run in parallel but results keep insertion order, and each run
// is an independent planning invocation.
fn test_batch_runner() {
    let baseline = Scenario::from_file(&name_wrapper("scenario_csv.yaml")).unwrap();
    let mut expanded = baseline.clone();
    expanded.clusters[0].node_count = 4;

    let mut runner = BatchRunner::new();
    runner.add_scenario("baseline", baseline.clone());
    runner.add_scenario("expanded", expanded);
    let reports = runner.run(2).unwrap();

    let names: Vec<&str> = reports.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["baseline", "expanded"]);
    for report in reports.values() {
        assert_eq!(
            report.assignments.len() + report.unplaced.len(),
            baseline.workload.len()
        );
    }
    assert!(reports["expanded"].unplaced.len() <= reports["baseline"].unplaced.len());
}
