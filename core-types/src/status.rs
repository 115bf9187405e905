use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Discrete health level exposed by each managed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    Ok,
    Degraded,
    Failed,
}

impl Default for Health {
    fn default() -> Self {
        Health::Degraded
    }
}

/// Numeric reading published alongside a component's health, e.g. the
/// current percent full or the recorded day count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusGauge {
    pub label: String,
    pub value: f64,
    pub unit: Option<String>,
}

impl StatusGauge {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            unit: None,
        }
    }

    pub fn with_unit(label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            unit: Some(unit.into()),
        }
    }
}

#[derive(Debug, Default)]
struct StatusInner {
    health: Health,
    errors: Vec<String>,
    gauges: Vec<StatusGauge>,
}

/// Immutable view handed to consumers (reports, dashboards, tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub name: String,
    pub health: Health,
    pub errors: Vec<String>,
    pub gauges: Vec<StatusGauge>,
}

/// Shared handle a component uses to publish its own health.
///
/// Clones share state; the component keeps one side and hands the other to
/// whatever observes it.
#[derive(Clone)]
pub struct StatusHandle {
    name: &'static str,
    inner: Arc<RwLock<StatusInner>>,
}

impl StatusHandle {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(RwLock::new(StatusInner::default())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn set_health(&self, health: Health) {
        self.inner.write().health = health;
    }

    pub fn health(&self) -> Health {
        self.inner.read().health
    }

    pub fn push_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.health = Health::Degraded;
        inner.errors.push(message.into());
    }

    pub fn clear_errors(&self) {
        self.inner.write().errors.clear();
    }

    pub fn set_gauges(&self, gauges: Vec<StatusGauge>) {
        self.inner.write().gauges = gauges;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        let inner = self.inner.read();
        StatusSnapshot {
            name: self.name.to_string(),
            health: inner.health,
            errors: inner.errors.clone(),
            gauges: inner.gauges.clone(),
        }
    }
}
