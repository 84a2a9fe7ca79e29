use super::Comparator;
use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The separator used to combine attribute names (and category values) in multi-attribute keys.
///
/// The key `Content&Difficulty` refers to the combination of the `Content` and `Difficulty` attributes,
/// and the category `1&hard` matches the items with content `1` and difficulty `hard`.
pub const MULTI_ATTRIBUTE_SEPARATOR: char = '&';

/// Splits a (possibly multi-attribute) key into its components.
///
/// Components are trimmed.
///
/// # Example
///
/// ```
/// # use ata::constraints::split_multi_attribute_key;
/// assert_eq!(vec!["Content"], split_multi_attribute_key("Content"));
/// assert_eq!(vec!["Content", "Difficulty"], split_multi_attribute_key("Content & Difficulty"));
/// ```
pub fn split_multi_attribute_key(key: &str) -> Vec<String> {
    key.split(MULTI_ATTRIBUTE_SEPARATOR)
        .map(|s| s.trim().to_string())
        .collect()
}

/// A rule bounding the number of items of each category, with a common comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    comparator: Comparator,
    values: IndexMap<String, i64>,
}

impl Rule {
    /// Builds a new rule given its comparator symbol and the bounds for each category.
    ///
    /// An error is returned if the comparator is not one of `>=`, `<=` and `=`.
    ///
    /// # Example
    ///
    /// ```
    /// # use ata::constraints::Rule;
    /// # use indexmap::IndexMap;
    /// let mut values = IndexMap::new();
    /// values.insert("3".to_string(), 15);
    /// assert!(Rule::new("<=", values.clone()).is_ok());
    /// assert!(Rule::new("<", values).is_err());
    /// ```
    pub fn new(comparator: &str, values: IndexMap<String, i64>) -> Result<Self> {
        Ok(Self::new_with_comparator(
            Comparator::try_from(comparator)?,
            values,
        ))
    }

    /// Builds a new rule given its comparator and the bounds for each category.
    pub fn new_with_comparator(comparator: Comparator, values: IndexMap<String, i64>) -> Self {
        Rule { comparator, values }
    }

    /// Returns the comparator of this rule.
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Returns the bounds for each category, in their definition order.
    pub fn values(&self) -> &IndexMap<String, i64> {
        &self.values
    }
}

/// The constraints on the content of the forms.
///
/// A specification maps attribute names (or combinations of them, see [`MULTI_ATTRIBUTE_SEPARATOR`])
/// to lists of [`Rule`]s.
/// Keys are always split on [`MULTI_ATTRIBUTE_SEPARATOR`], so an attribute whose name contains `&`
/// cannot be constrained.
/// The definition order of attributes, rules and categories is preserved,
/// so that encoding the same specification always produces the same program.
///
/// Its JSON representation is a nested object:
///
/// ```text
/// {
///   "Content": [
///     { "comparator": ">=", "values": { "1": 0, "2": 0 } },
///     { "comparator": "<=", "values": { "1": 10, "2": 10 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSpec {
    rules: IndexMap<String, Vec<Rule>>,
}

impl ConstraintSpec {
    /// Adds a rule for an attribute (or a combination of attributes).
    ///
    /// Rules for the same key are kept in their insertion order.
    pub fn add_rule(&mut self, attribute: &str, rule: Rule) {
        self.rules
            .entry(attribute.to_string())
            .or_default()
            .push(rule);
    }

    /// Iterates over the attribute keys and their rules.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> + '_ {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns the number of rules, all attributes included.
    pub fn n_rules(&self) -> usize {
        self.rules.values().map(|r| r.len()).sum()
    }

    /// Returns the number of category bounds, all rules included.
    ///
    /// This is the number of category constraints written for each form.
    pub fn n_category_bounds(&self) -> usize {
        self.rules
            .values()
            .flat_map(|rules| rules.iter())
            .map(|r| r.values.len())
            .sum()
    }

    /// Returns `true` iff this specification contains no rule.
    pub fn is_empty(&self) -> bool {
        self.n_rules() == 0
    }

    /// Returns the specification used when none is provided.
    ///
    /// It applies to the `Content` attribute, with categories `1` to `5`:
    /// each category has a lower bound of 0 items,
    /// and an upper bound of 10 items, except category `3` that is bounded by 15 items.
    pub fn default_content_spec() -> Self {
        let mut spec = ConstraintSpec::default();
        let categories = ["1", "2", "3", "4", "5"];
        spec.add_rule(
            "Content",
            Rule::new_with_comparator(
                Comparator::AtLeast,
                categories.iter().map(|c| (c.to_string(), 0)).collect(),
            ),
        );
        spec.add_rule(
            "Content",
            Rule::new_with_comparator(
                Comparator::AtMost,
                categories
                    .iter()
                    .map(|c| (c.to_string(), if *c == "3" { 15 } else { 10 }))
                    .collect(),
            ),
        );
        spec
    }
}

/// Converts the category keys of a rule into tuples, one value per attribute.
///
/// An error is returned if a key does not have exactly `arity` components.
pub(crate) fn tuple_bounds(rule: &Rule, arity: usize) -> Result<IndexMap<Vec<String>, i64>> {
    rule.values
        .iter()
        .map(|(category, bound)| {
            let tuple = split_multi_attribute_key(category);
            if tuple.len() == arity {
                Ok((tuple, *bound))
            } else {
                Err(anyhow!(
                    r#"category "{}" has {} value(s), expected {}"#,
                    category,
                    tuple.len(),
                    arity
                ))
            }
        })
        .collect()
}
