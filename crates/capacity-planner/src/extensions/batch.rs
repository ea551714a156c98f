//! Tools for evaluating multiple what-if scenarios in parallel.

use std::fs::File;
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use log::info;
use threadpool::ThreadPool;

use crate::core::planner::CapacityPlanner;
use crate::core::report::CapacityPlanReport;
use crate::extensions::scenario::{Scenario, ScenarioError};

/// Runs the planner over a set of named scenarios on a thread pool and
/// collects their reports.
///
/// Each scenario gets its own planner and its own inputs, so runs share no
/// state and can proceed concurrently; the collected results are ordered by
/// scenario insertion order regardless of completion order.
pub struct BatchRunner {
    scenarios: Vec<(String, Scenario)>,
    output_path: Option<String>,
}

impl BatchRunner {
    /// Creates a batch runner that only returns the collected reports.
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
            output_path: None,
        }
    }

    /// Creates a batch runner that also writes the collected reports to a
    /// JSON file.
    pub fn with_output(output_path: &str) -> Self {
        Self {
            scenarios: Vec::new(),
            output_path: Some(output_path.to_string()),
        }
    }

    /// Adds a named scenario to the batch.
    pub fn add_scenario(&mut self, name: &str, scenario: Scenario) {
        self.scenarios.push((name.to_string(), scenario));
    }

    /// Runs all scenarios using the specified number of threads.
    pub fn run(&mut self, num_threads: usize) -> Result<IndexMap<String, CapacityPlanReport>, ScenarioError> {
        let results = Arc::new(Mutex::new(Vec::new()));
        let pool = ThreadPool::new(num_threads);

        for (run_id, (name, scenario)) in self.scenarios.drain(..).enumerate() {
            let planner = CapacityPlanner::new(scenario.config.clone())?;
            let results = results.clone();

            pool.execute(move || {
                info!("RUN {}: {}", run_id, name);
                let report = planner.plan(&scenario.workload, &scenario.clusters);
                results.lock().unwrap().push((run_id, name, report));
            });
        }

        pool.join();
        let mut entries = Arc::try_unwrap(results).unwrap().into_inner().unwrap();
        entries.sort_by_key(|(run_id, _, _)| *run_id);

        let mut reports = IndexMap::new();
        for (_, name, report) in entries {
            reports.insert(name, report?);
        }

        if let Some(path) = &self.output_path {
            let mut file = File::create(path).map_err(|e| ScenarioError::Io {
                path: path.clone(),
                source: e,
            })?;
            serde_json::to_writer_pretty(&mut file, &reports).map_err(|e| ScenarioError::Json {
                path: path.clone(),
                source: e,
            })?;
        }
        Ok(reports)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}
