use std::{cell::Cell, path::PathBuf, rc::Rc};

use tracing::{error, info};

use crate::{
    callbacks::dump_json, model::SimulationResult, simulation::callback::SimulationCallback,
};

/// Writes every finished trip to `<root>/<name>/<run>/result.json`.
///
/// Clones share the run counter, so the per-plan copies a [`crate::TripPlanner`] makes keep
/// numbering runs instead of overwriting run `0`.
#[derive(Debug, Clone)]
pub struct ResultDumpCallback {
    root: PathBuf,
    name: String,
    run: Rc<Cell<usize>>,
}

impl ResultDumpCallback {
    pub fn new(root: impl Into<PathBuf>, name: String) -> Self {
        Self {
            root: root.into(),
            name,
            run: Rc::default(),
        }
    }

    pub fn get_file(&self, filename: &str) -> PathBuf {
        let mut dir = self.root.clone();
        dir.push(&self.name);
        dir.push(self.run.get().to_string());
        dir.push(filename);
        dir
    }
}

impl SimulationCallback for ResultDumpCallback {
    fn visit_finished(&mut self, result: &SimulationResult) {
        let path = self.get_file("result.json");
        match dump_json(&path, result) {
            Ok(()) => info!(path = %path.display(), "wrote trip result"),
            Err(err) => error!("failed to write trip result JSON file: {:#}", err),
        }
        self.run.set(self.run.get() + 1);
    }
}

#[test]
fn test_dump_paths_count_runs() {
    let dir = tempfile::tempdir().unwrap();
    let mut callback = ResultDumpCallback::new(dir.path(), "trip".to_string());
    callback.visit_finished(&SimulationResult::default());
    callback.visit_finished(&SimulationResult::default());

    assert!(dir.path().join("trip/0/result.json").exists());
    assert!(dir.path().join("trip/1/result.json").exists());
}

#[test]
fn test_clones_keep_counting_runs() {
    let dir = tempfile::tempdir().unwrap();
    let callback = ResultDumpCallback::new(dir.path(), "trip".to_string());
    for _ in 0..2 {
        let mut per_plan = callback.clone();
        per_plan.visit_finished(&SimulationResult::default());
    }

    assert!(dir.path().join("trip/0/result.json").exists());
    assert!(dir.path().join("trip/1/result.json").exists());
}
