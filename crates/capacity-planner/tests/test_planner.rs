use capacity_planner::core::bottleneck::Severity;
use capacity_planner::core::capacity::EffectiveCapacity;
use capacity_planner::core::cluster::{ClusterCandidate, HaPolicy};
use capacity_planner::core::common::UnplacedReason;
use capacity_planner::core::config::PlannerConfig;
use capacity_planner::core::error::ValidationError;
use capacity_planner::core::ha_reserve::ha_reserve_fraction;
use capacity_planner::core::planner::CapacityPlanner;
use capacity_planner::core::report::CapacityPlanReport;
use capacity_planner::core::workload::WorkloadItem;

fn vm(id: &str, cpu_cores: u32, memory_gb: f64, storage_gb: f64) -> WorkloadItem {
    WorkloadItem::new(id, cpu_cores, memory_gb, storage_gb, "")
}

fn cluster(id: &str, node_count: u32, cpu_cores_per_node: u32, memory_gb_per_node: f64, storage_gb_total: f64) -> ClusterCandidate {
    ClusterCandidate {
        id: id.to_string(),
        display_name: String::new(),
        node_count,
        cpu_cores_per_node,
        memory_gb_per_node,
        storage_gb_total,
        ha_policy: HaPolicy::N0,
        cpu_overcommit_ratio: 1.,
        memory_overcommit_ratio: 1.,
    }
}

fn planner() -> CapacityPlanner {
    CapacityPlanner::new(PlannerConfig::new()).unwrap()
}

fn plan(workload: &[WorkloadItem], clusters: &[ClusterCandidate]) -> CapacityPlanReport {
    planner().plan(workload, clusters).unwrap()
}

#[test]
// Empty inputs produce an empty but sufficient report.
fn test_empty_input() {
    let report = plan(&[], &[]);
    assert!(report.assignments.is_empty());
    assert!(report.unplaced.is_empty());
    assert!(report.invalid_clusters.is_empty());
    assert!(report.cluster_utilizations.is_empty());
    assert!(report.is_sufficient);
}

#[test]
// Without any candidate cluster every item is unplaced with a dedicated
// reason.
fn test_no_clusters() {
    let report = plan(&[vm("vm1", 4, 16., 100.)], &[]);
    assert!(report.assignments.is_empty());
    assert_eq!(report.unplaced.len(), 1);
    assert_eq!(report.unplaced[0].workload_item_id, "vm1");
    assert_eq!(report.unplaced[0].reason, UnplacedReason::NoClustersProvided);
    assert!(!report.is_sufficient);
}

#[test]
// Every workload item is accounted for exactly once, either placed or
// unplaced.
fn test_conservation() {
    let workload: Vec<WorkloadItem> = (0..20).map(|i| vm(&format!("vm{:02}", i), 4, 16., 100.)).collect();
    let clusters = vec![cluster("c1", 2, 16, 64., 1000.), cluster("c2", 1, 8, 32., 500.)];

    let report = plan(&workload, &clusters);
    assert_eq!(report.assignments.len() + report.unplaced.len(), workload.len());
}

#[test]
// The summed demand placed on each cluster never exceeds its effective
// capacity in any dimension.
fn test_capacity_invariant() {
    let workload: Vec<WorkloadItem> = (0..30).map(|i| vm(&format!("vm{:02}", i), 2, 7., 33.)).collect();
    let mut clusters = vec![cluster("c1", 4, 8, 24., 600.), cluster("c2", 3, 4, 16., 400.)];
    clusters[0].ha_policy = HaPolicy::N1;
    clusters[0].cpu_overcommit_ratio = 2.;
    clusters[1].ha_policy = HaPolicy::N2;

    let report = plan(&workload, &clusters);

    for c in &clusters {
        let fraction = ha_reserve_fraction(c.node_count, c.ha_policy).unwrap();
        let capacity = EffectiveCapacity::of_cluster(c, fraction);
        let placed: Vec<&WorkloadItem> = report
            .assignments
            .iter()
            .filter(|a| a.cluster_id == c.id)
            .map(|a| workload.iter().find(|w| w.id == a.workload_item_id).unwrap())
            .collect();
        let cpu: f64 = placed.iter().map(|w| w.cpu_cores as f64).sum();
        let memory: f64 = placed.iter().map(|w| w.memory_gb).sum();
        let storage: f64 = placed.iter().map(|w| w.storage_gb).sum();
        assert!(cpu <= capacity.cpu_cores);
        assert!(memory <= capacity.memory_gb);
        assert!(storage <= capacity.storage_gb);
    }
}

#[test]
// Two runs over identical input produce identical serialized reports.
fn test_determinism() {
    let workload: Vec<WorkloadItem> = (0..15).map(|i| vm(&format!("vm{:02}", i), 1 + i % 4, 8., 50.)).collect();
    let clusters = vec![
        cluster("beta", 2, 8, 32., 400.),
        cluster("alpha", 2, 8, 32., 400.),
        cluster("gamma", 1, 16, 64., 800.),
    ];

    let first = serde_json::to_string(&plan(&workload, &clusters)).unwrap();
    let second = serde_json::to_string(&plan(&workload, &clusters)).unwrap();
    assert_eq!(first, second);
}

#[test]
// Adding a cluster never increases the number of unplaced items.
fn test_monotonicity() {
    let workload: Vec<WorkloadItem> = (0..10).map(|i| vm(&format!("vm{}", i), 4, 16., 100.)).collect();
    let mut clusters = vec![cluster("c1", 1, 16, 64., 500.)];

    let before = plan(&workload, &clusters);
    assert!(!before.unplaced.is_empty());

    clusters.push(cluster("c2", 2, 16, 64., 1000.));
    let after = plan(&workload, &clusters);
    assert!(after.unplaced.len() <= before.unplaced.len());
}

#[test]
// A cluster sized exactly to its workload ends at 100% utilization in all
// dimensions, which is critical and makes the plan insufficient even though
// everything was placed.
fn test_exact_fit_is_critical() {
    let report = plan(&[vm("vm1", 8, 32., 100.)], &[cluster("c1", 1, 8, 32., 100.)]);

    assert_eq!(report.assignments.len(), 1);
    assert!(report.unplaced.is_empty());

    let utilization = &report.cluster_utilizations["c1"];
    assert_eq!(utilization.cpu_utilization_pct, 100.);
    assert_eq!(utilization.memory_utilization_pct, 100.);
    assert_eq!(utilization.storage_utilization_pct, 100.);
    assert_eq!(utilization.bottlenecks.len(), 3);
    assert!(utilization.bottlenecks.iter().all(|b| b.severity == Severity::Critical));
    assert!(!report.is_sufficient);
}

#[test]
// Warning-level utilization is reported but does not make the plan
// insufficient.
fn test_warning_does_not_fail_plan() {
    let report = plan(&[vm("vm1", 8, 8., 85.)], &[cluster("c1", 1, 10, 10., 100.)]);

    let utilization = &report.cluster_utilizations["c1"];
    assert_eq!(utilization.storage_utilization_pct, 85.);
    assert_eq!(utilization.bottlenecks.len(), 3);
    assert!(utilization.bottlenecks.iter().all(|b| b.severity == Severity::Warning));
    assert!(report.is_sufficient);
}

#[test]
// A cluster whose node count cannot satisfy its HA policy is excluded from
// packing and reported; workload that only it could hold becomes unplaced.
fn test_ha_rejection() {
    let mut invalid = cluster("c1", 2, 16, 64., 1000.);
    invalid.ha_policy = HaPolicy::N2;

    let report = plan(&[vm("vm1", 4, 16., 100.)], &[invalid]);

    assert_eq!(report.invalid_clusters.len(), 1);
    assert_eq!(report.invalid_clusters[0].cluster_id, "c1");
    assert_eq!(report.invalid_clusters[0].ha_policy, HaPolicy::N2);
    assert!(report.cluster_utilizations.is_empty());
    assert_eq!(report.unplaced[0].reason, UnplacedReason::NoClustersProvided);
}

#[test]
// The largest item is tried against the roomiest cluster first; when a
// dimension blocks it there, it spills over to the next cluster and the
// assignment is flagged.
fn test_spillover() {
    let clusters = vec![cluster("big", 1, 4, 64., 1000.), cluster("small", 1, 16, 32., 200.)];
    let workload = vec![vm("vm-a", 2, 4., 10.), vm("vm-b", 8, 8., 50.)];

    let report = plan(&workload, &clusters);

    assert!(report.unplaced.is_empty());
    let b = report.assignments.iter().find(|a| a.workload_item_id == "vm-b").unwrap();
    assert_eq!(b.cluster_id, "small");
    assert!(b.is_spillover);
    let a = report.assignments.iter().find(|a| a.workload_item_id == "vm-a").unwrap();
    assert_eq!(a.cluster_id, "big");
    assert!(!a.is_spillover);
}

#[test]
// Doubling the CPU overcommit ratio doubles the CPU-bound load a cluster
// accepts; storage is unaffected by overcommit.
fn test_overcommit_effect() {
    let workload: Vec<WorkloadItem> = (0..4).map(|i| vm(&format!("vm{}", i), 4, 1., 10.)).collect();
    let mut c = cluster("c1", 1, 8, 100., 1000.);

    let report = plan(&workload, &[c.clone()]);
    assert_eq!(report.assignments.len(), 2);
    assert_eq!(report.unplaced.len(), 2);
    assert!(report.unplaced.iter().all(|u| u.reason == UnplacedReason::InsufficientCpu));

    c.cpu_overcommit_ratio = 2.;
    let report = plan(&workload, &[c.clone()]);
    assert_eq!(report.assignments.len(), 4);
    assert!(report.unplaced.is_empty());
    assert_eq!(report.cluster_utilizations["c1"].storage_utilization_pct, 4.);
}

#[test]
// Malformed numeric input is a caller bug: the planner fails fast without
// producing a partial report.
fn test_validation_fails_fast() {
    let p = planner();
    let good_cluster = cluster("c1", 1, 8, 32., 100.);

    let result = p.plan(&[vm("vm1", 1, -16., 10.)], &[good_cluster.clone()]);
    assert!(matches!(result, Err(ValidationError::InvalidDemand { .. })));

    let result = p.plan(&[vm("vm1", 1, 16., f64::NAN)], &[good_cluster.clone()]);
    assert!(matches!(result, Err(ValidationError::InvalidDemand { .. })));

    let mut bad = good_cluster.clone();
    bad.cpu_overcommit_ratio = 0.5;
    let result = p.plan(&[], &[bad]);
    assert!(matches!(result, Err(ValidationError::InvalidOvercommitRatio { .. })));

    let mut bad = good_cluster.clone();
    bad.node_count = 0;
    let result = p.plan(&[], &[bad]);
    assert!(matches!(result, Err(ValidationError::ZeroNodeCount { .. })));

    let result = p.plan(&[], &[good_cluster.clone(), good_cluster.clone()]);
    assert!(matches!(result, Err(ValidationError::DuplicateClusterId { .. })));
}

#[test]
// An all-zero-demand item is degenerate but placeable.
fn test_zero_demand_item_is_placed() {
    let report = plan(&[vm("empty", 0, 0., 0.)], &[cluster("c1", 1, 8, 32., 100.)]);
    assert_eq!(report.assignments.len(), 1);
    assert!(report.is_sufficient);
}
