//! Coverage legend: maps classification class names to value predicates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::predicate::ValuePredicate;

/// A named land-cover class and the predicates that identify it in sampled data.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationClass {
    /// Class name (e.g. `"forest"`).
    pub name: String,
    /// Predicates in registration order.
    pub predicates: Vec<ValuePredicate>,
}

/// One row of a legend as written in a manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Class this value maps to.
    pub class: String,
    /// Exact classification value.
    #[serde(default)]
    pub exact_value: Option<f32>,
    /// Inclusive lower bound.
    #[serde(default)]
    pub min_value: Option<f32>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub max_value: Option<f32>,
}

impl LegendEntry {
    fn predicate(&self) -> ValuePredicate {
        ValuePredicate {
            exact_value: self.exact_value,
            min_value: self.min_value,
            max_value: self.max_value,
        }
    }
}

/// Read-only registry of classification classes, looked up by name.
///
/// Built once before generation and never mutated afterwards, so a single
/// legend can be shared by concurrent generation calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Legend {
    classes: Vec<ClassificationClass>,
    name_to_index: HashMap<String, usize>,
}

impl Legend {
    /// Creates an empty legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a legend from manifest rows. Rows naming the same class are
    /// appended to that class in order.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LegendEntry>) -> Self {
        let mut legend = Self::new();
        for entry in entries {
            legend.register(&entry.class, entry.predicate());
        }
        legend
    }

    /// Appends `predicate` to `class`, creating the class on first use.
    pub fn register(&mut self, class: &str, predicate: ValuePredicate) {
        let index = match self.name_to_index.get(class) {
            Some(&index) => index,
            None => {
                let index = self.classes.len();
                self.classes.push(ClassificationClass {
                    name: class.to_string(),
                    predicates: Vec::new(),
                });
                self.name_to_index.insert(class.to_string(), index);
                index
            }
        };
        self.classes[index].predicates.push(predicate);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, class: &str, predicate: ValuePredicate) -> Self {
        self.register(class, predicate);
        self
    }

    /// Looks up a class by name.
    pub fn class(&self, name: &str) -> Option<&ClassificationClass> {
        self.name_to_index.get(name).map(|&i| &self.classes[i])
    }

    /// Predicates for `name`, or an empty slice (with a warning) if unknown.
    pub fn predicates_for(&self, name: &str) -> &[ValuePredicate] {
        match self.class(name) {
            Some(class) => &class.predicates,
            None => {
                log::warn!("class \"{name}\" not found in the legend");
                &[]
            }
        }
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassificationClass> {
        self.classes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_class_yields_no_predicates() {
        let legend = Legend::new().with("forest", ValuePredicate::range(5.0, 10.0));
        assert!(legend.predicates_for("water").is_empty());
        assert!(legend.class("water").is_none());
    }

    #[test]
    fn test_predicates_keep_registration_order() {
        let legend = Legend::new()
            .with("forest", ValuePredicate::exact(41.0))
            .with("grass", ValuePredicate::exact(71.0))
            .with("forest", ValuePredicate::range(42.0, 43.0));

        assert_eq!(legend.len(), 2);
        assert_eq!(
            legend.predicates_for("forest"),
            &[ValuePredicate::exact(41.0), ValuePredicate::range(42.0, 43.0)]
        );
    }

    #[test]
    fn test_from_entries_groups_by_class() {
        let entries = vec![
            LegendEntry {
                class: "water".into(),
                exact_value: Some(11.0),
                min_value: None,
                max_value: None,
            },
            LegendEntry {
                class: "forest".into(),
                exact_value: None,
                min_value: Some(41.0),
                max_value: Some(43.0),
            },
            LegendEntry {
                class: "water".into(),
                exact_value: Some(12.0),
                min_value: None,
                max_value: None,
            },
        ];
        let legend = Legend::from_entries(&entries);
        let names: Vec<_> = legend.classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["water", "forest"]);
        assert_eq!(legend.predicates_for("water").len(), 2);
    }

    #[test]
    fn test_legend_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Legend>();
    }
}
