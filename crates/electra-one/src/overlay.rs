//! Overlays: device-side lookup tables turning parameter values into labels.
//!
//! Overlays are collected in a first pass over the bindings. Each distinct
//! lookup parameter gets exactly one overlay, numbered from 1 in the order it
//! is first encountered, no matter how many controls are bound to it.

use crate::binding::{ControllerBinding, ParameterKey};
use serde::Serialize;
use std::collections::HashMap;

/// One label of an overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayItem {
    pub value: i32,
    pub label: String,
}

/// Lookup table for one parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub id: u32,
    pub name: String,
    pub items: Vec<OverlayItem>,
}

/// Overlays generated for one build, plus the parameter to overlay id map.
#[derive(Debug, Default)]
pub struct OverlayCatalog {
    overlays: Vec<Overlay>,
    ids: HashMap<ParameterKey, u32>,
}

impl OverlayCatalog {
    /// An empty catalog. Value descriptors built against it carry no overlay ids.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collect the overlays for all lookup parameters in `bindings`.
    pub fn collect(bindings: &[ControllerBinding]) -> Self {
        let mut catalog = Self::default();
        for binding in bindings {
            let caps = binding.capabilities();
            if !caps.lookup {
                continue;
            }
            let key = binding.parameter_key();
            if catalog.ids.contains_key(&key) {
                continue;
            }

            let parameter = binding.parameter();
            let (Some(range), Some(lookup)) = (caps.range, parameter.lookup()) else {
                log::warn!(
                    "Parameter '{}' is a lookup without an integer range, no overlay created",
                    parameter.name()
                );
                continue;
            };

            let id = catalog.overlays.len() as u32 + 1;
            let items = (0..=range.max)
                .map(|value| OverlayItem {
                    value,
                    label: lookup.value_as_text(value),
                })
                .collect();

            log::debug!("Overlay {} created for parameter '{}'", id, parameter.name());
            catalog.overlays.push(Overlay {
                id,
                name: parameter.name().to_string(),
                items,
            });
            catalog.ids.insert(key, id);
        }
        catalog
    }

    /// Overlay id assigned to the parameter of `binding`, if any.
    pub fn overlay_id(&self, binding: &ControllerBinding) -> Option<u32> {
        self.ids.get(&binding.parameter_key()).copied()
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn into_overlays(self) -> Vec<Overlay> {
        self.overlays
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
