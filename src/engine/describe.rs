//! Serializable description of a blueprint for external diagram renderers.

use crate::engine::blueprint::Blueprint;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineDescription {
    pub name: String,
    pub initial: String,
    pub states: Vec<StateDescription>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDescription {
    pub name: String,
    pub accepting: bool,
    pub transitions: Vec<EdgeDescription>,
}

/// One transition. Stack symbols are rendered with their `Debug` form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub guarded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<String>,
}

impl<C, K: Debug> Blueprint<C, K> {
    /// Snapshot of the state diagram.
    pub fn describe(&self) -> MachineDescription {
        let states = self
            .states
            .iter()
            .map(|state| StateDescription {
                name: state.name.clone(),
                accepting: state.accepting,
                transitions: state
                    .transitions
                    .iter()
                    .map(|t| EdgeDescription {
                        target: t.target.clone(),
                        label: t.label.clone(),
                        guarded: t.guard.is_some(),
                        pop: t.pop.as_ref().map(|k| format!("{k:?}")),
                        push: t.push.as_ref().map(|k| format!("{k:?}")),
                    })
                    .collect(),
            })
            .collect();

        MachineDescription {
            name: self.name.clone(),
            initial: self.initial().name.clone(),
            states,
        }
    }
}

impl MachineDescription {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
