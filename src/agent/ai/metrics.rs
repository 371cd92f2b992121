use std::fmt;

/// Named key -> string log of search statistics.
///
/// Purely observational: the search fills one entry per completed depth
/// iteration plus summary counters, and the caller may render them however
/// it likes. Nothing in the algorithm ever reads these back.
///
/// Entries keep insertion order, so the per-depth lines display in the
/// order the iterations ran. The handful of entries per decision makes the
/// linear key lookup a non-issue.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    values: Vec<(String, String)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn set_u64(&mut self, name: impl Into<String>, value: u64) {
        self.set(name, value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.values {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}
