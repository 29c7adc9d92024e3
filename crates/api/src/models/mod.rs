//! Domain models for the scenario service.

pub mod scenario;

pub use scenario::{
    DateRange, DateRangeDraft, NewScenario, Scenario, ScenarioChanges, ScenarioDraft,
};
