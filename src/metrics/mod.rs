use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated across imports on one importer.
#[derive(Debug, Default, Clone)]
pub struct ImportMetrics {
    imports: u64,
    failures: u64,
    frames: u64,
    elements: u64,
    repairs: u64,
}

impl ImportMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_import(&mut self, frames: usize, elements: usize, repairs: usize) {
        self.imports = self.imports.saturating_add(1);
        self.frames = self.frames.saturating_add(frames as u64);
        self.elements = self.elements.saturating_add(elements as u64);
        self.repairs = self.repairs.saturating_add(repairs as u64);
    }

    pub fn record_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            imports: self.imports,
            failures: self.failures,
            frames: self.frames,
            elements: self.elements,
            repairs: self.repairs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub imports: u64,
    pub failures: u64,
    pub frames: u64,
    pub elements: u64,
    pub repairs: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "import_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("imports".to_string(), json!(self.imports));
        map.insert("failures".to_string(), json!(self.failures));
        map.insert("frames".to_string(), json!(self.frames));
        map.insert("elements".to_string(), json!(self.elements));
        map.insert("repairs".to_string(), json!(self.repairs));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_and_snapshot() {
        let mut metrics = ImportMetrics::new();
        metrics.record_import(2, 9, 1);
        metrics.record_import(1, 3, 0);
        metrics.record_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.imports, 2);
        assert_eq!(snapshot.failures, 1);
        assert_eq!(snapshot.frames, 3);
        assert_eq!(snapshot.elements, 12);
        assert_eq!(snapshot.repairs, 1);

        let event = snapshot.to_log_event("placard::metrics");
        assert_eq!(event.message, "import_metrics");
        assert_eq!(event.fields.get("frames"), Some(&json!(3)));
    }
}
