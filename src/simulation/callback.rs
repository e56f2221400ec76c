use dyn_clone::DynClone;

use crate::model::{DutyEvent, SimulationResult, Stop};

/// Observer of a trip simulation. Every hook defaults to doing nothing.
pub trait SimulationCallback: DynClone {
    fn visit_event(&mut self, _event: &DutyEvent) {}
    fn visit_stop(&mut self, _stop: &Stop) {}
    fn visit_finished(&mut self, _result: &SimulationResult) {}
}

dyn_clone::clone_trait_object!(SimulationCallback);
