use super::{Comparator, Constraint};
use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use std::io::Write;

/// A set of constraints bounding the number of items of each category.
///
/// The items are partitioned by the values they take for one or more attributes.
/// Each category given in the bound mapping produces exactly one [`Constraint`],
/// involving the items whose values are equal to the category (for all the attributes);
/// items whose values are not a key of the mapping are not involved in any constraint of the set.
///
/// The partition does not depend on the form; the same set is written once for each form.
#[derive(Debug, Clone)]
pub struct CategoryConstraintSet {
    attributes: Vec<String>,
    categories: Vec<Vec<String>>,
    constraints: Vec<Constraint>,
}

impl CategoryConstraintSet {
    /// Builds the constraints for a single attribute.
    ///
    /// The classification gives the value of the attribute for each item,
    /// positionally aligned with the item identifiers.
    /// Constraints are built in the iteration order of the bound mapping.
    /// Values and categories are compared after trimming surrounding whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// # use ata::constraints::{CategoryConstraintSet, Comparator};
    /// # use indexmap::IndexMap;
    /// let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    /// let mut bounds = IndexMap::new();
    /// bounds.insert("1".to_string(), 1);
    /// let set = CategoryConstraintSet::new("Content", &["1", "2", "1"], Comparator::AtMost, &bounds, &ids).unwrap();
    /// assert_eq!("a_0 + c_0<=1;\n", set.to_lp_string(0));
    /// ```
    pub fn new<S>(
        attribute: &str,
        classification: &[S],
        comparator: Comparator,
        bounds: &IndexMap<String, i64>,
        item_ids: &[String],
    ) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let tuple_bounds = bounds
            .iter()
            .map(|(category, bound)| (vec![category.clone()], *bound))
            .collect::<IndexMap<Vec<String>, i64>>();
        Self::new_multi(
            &[attribute],
            &[classification],
            comparator,
            &tuple_bounds,
            item_ids,
        )
    }

    /// Builds the constraints for a combination of attributes.
    ///
    /// Categories are tuples with one value per attribute.
    /// An item matches a category iff its value for each attribute is equal to the corresponding tuple entry.
    /// Values and tuple entries are compared after trimming surrounding whitespace.
    ///
    /// An error is returned if no attribute is given, if a classification length differs from the number of items,
    /// or if a category does not have one value per attribute.
    pub fn new_multi<A, S>(
        attributes: &[A],
        classifications: &[&[S]],
        comparator: Comparator,
        bounds: &IndexMap<Vec<String>, i64>,
        item_ids: &[String],
    ) -> Result<Self>
    where
        A: AsRef<str>,
        S: AsRef<str>,
    {
        if attributes.is_empty() {
            return Err(anyhow!("category constraints require at least one attribute"));
        }
        if attributes.len() != classifications.len() {
            return Err(anyhow!(
                "got {} attribute(s) but {} classification(s)",
                attributes.len(),
                classifications.len()
            ));
        }
        for (attribute, classification) in attributes.iter().zip(classifications.iter()) {
            if classification.len() != item_ids.len() {
                return Err(anyhow!(
                    r#"attribute "{}" classifies {} item(s), expected {}"#,
                    attribute.as_ref(),
                    classification.len(),
                    item_ids.len()
                ));
            }
        }
        let mut categories = Vec::with_capacity(bounds.len());
        let mut constraints = Vec::with_capacity(bounds.len());
        for (category, bound) in bounds.iter() {
            if category.len() != attributes.len() {
                return Err(anyhow!(
                    "category {:?} has {} value(s), expected one for each of the {} attribute(s)",
                    category,
                    category.len(),
                    attributes.len()
                ));
            }
            let matching_ids = item_ids
                .iter()
                .enumerate()
                .filter(|(i, _)| item_matches(classifications, category, *i))
                .map(|(_, id)| id.clone())
                .collect();
            categories.push(category.clone());
            constraints.push(Constraint::new(matching_ids, comparator, *bound));
        }
        Ok(CategoryConstraintSet {
            attributes: attributes.iter().map(|a| a.as_ref().to_string()).collect(),
            categories,
            constraints,
        })
    }

    /// Returns the attributes the categories are defined on.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Returns the number of constraints in this set.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` iff this set contains no constraint.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns the constraints, in the order of the bound mapping.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Iterates over the categories and their constraints.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], &Constraint)> + '_ {
        self.categories
            .iter()
            .map(|c| c.as_slice())
            .zip(self.constraints.iter())
    }

    /// Writes all the constraints of this set for the given form.
    pub fn write_lp(&self, form: usize, writer: &mut dyn Write) -> std::io::Result<()> {
        self.constraints
            .iter()
            .try_for_each(|c| c.write_lp(form, writer))
    }

    /// Returns all the constraints of this set for the given form, as lines of an lp_solve program.
    pub fn to_lp_string(&self, form: usize) -> String {
        self.constraints
            .iter()
            .map(|c| c.to_lp_string(form))
            .collect()
    }
}

fn item_matches<S>(classifications: &[&[S]], category: &[String], item: usize) -> bool
where
    S: AsRef<str>,
{
    classifications
        .iter()
        .zip(category.iter())
        .all(|(values, expected)| values[item].as_ref().trim() == expected.trim())
}
