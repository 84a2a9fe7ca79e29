use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref ITEM_ID_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_\[\]{}/.&#$%~'@^]+$").unwrap();
}

/// A table of items, each one having a unique identifier and a value for each attribute column.
///
/// The order of the items is the one in which their identifiers were given;
/// this order is the one used to name and list decision variables.
/// Identifiers are kept as strings, so integer identifiers are handled through their textual form.
/// Since they are used to name decision variables, they are restricted to letters, digits
/// and the characters `_[]{}/.&#$%~'@^` allowed in lp_solve names.
///
/// Attribute columns are named and hold one categorical value per item.
#[derive(Debug, Default)]
pub struct ItemTable {
    ids: Vec<String>,
    attributes: IndexMap<String, Vec<String>>,
}

impl ItemTable {
    /// Builds a new table with the provided item identifiers and no attribute.
    ///
    /// An error is returned if an identifier appears more than once,
    /// or if it contains a character that is not allowed in a variable name.
    ///
    /// # Example
    ///
    /// ```
    /// # use ata::items::ItemTable;
    /// let table = ItemTable::new_with_ids(&["a", "b", "c"]).unwrap();
    /// assert_eq!(3, table.n_items());
    /// assert!(ItemTable::new_with_ids(&["a", "a"]).is_err());
    /// assert!(ItemTable::new_with_ids(&["a;b"]).is_err());
    /// ```
    pub fn new_with_ids<T>(ids: &[T]) -> Result<Self>
    where
        T: AsRef<str>,
    {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids.iter().map(|id| id.as_ref()) {
            if !ITEM_ID_PATTERN.is_match(id) {
                return Err(anyhow!(
                    r#"item identifier "{}" is not a valid variable name"#,
                    id
                ));
            }
            if !seen.insert(id) {
                return Err(anyhow!(r#"duplicate item identifier "{}""#, id));
            }
        }
        Ok(ItemTable {
            ids: ids.iter().map(|id| id.as_ref().to_string()).collect(),
            attributes: IndexMap::new(),
        })
    }

    /// Adds an attribute column to this table.
    ///
    /// The values are positionally aligned with the item identifiers.
    /// An error is returned if the number of values differs from the number of items,
    /// or if an attribute with the same name is already defined.
    pub fn add_attribute<T>(&mut self, name: &str, values: &[T]) -> Result<()>
    where
        T: AsRef<str>,
    {
        if values.len() != self.ids.len() {
            return Err(anyhow!(
                r#"attribute "{}" has {} value(s), but the table has {} item(s)"#,
                name,
                values.len(),
                self.ids.len()
            ));
        }
        if self.attributes.contains_key(name) {
            return Err(anyhow!(r#"attribute "{}" is defined twice"#, name));
        }
        self.attributes.insert(
            name.to_string(),
            values.iter().map(|v| v.as_ref().to_string()).collect(),
        );
        Ok(())
    }

    /// Returns the number of items.
    pub fn n_items(&self) -> usize {
        self.ids.len()
    }

    /// Returns the item identifiers, in table order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Returns the values of an attribute column.
    ///
    /// An error is returned if no column has this name.
    ///
    /// # Example
    ///
    /// ```
    /// # use ata::items::ItemTable;
    /// let mut table = ItemTable::new_with_ids(&["a", "b"]).unwrap();
    /// table.add_attribute("Content", &["1", "2"]).unwrap();
    /// assert_eq!(&["1".to_string(), "2".to_string()], table.attribute("Content").unwrap());
    /// assert!(table.attribute("Difficulty").is_err());
    /// ```
    pub fn attribute(&self, name: &str) -> Result<&[String]> {
        self.attributes
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| anyhow!(r#"no attribute named "{}" in the item table"#, name))
    }

    /// Iterates over the attribute names, in the order they were added.
    pub fn iter_attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.keys().map(|k| k.as_str())
    }

    /// Returns the number of attribute columns.
    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_ids() {
        let table = ItemTable::new_with_ids(&["a", "b", "c"]).unwrap();
        assert_eq!(3, table.n_items());
        assert_eq!(&["a", "b", "c"], table.ids());
        assert_eq!(0, table.n_attributes());
    }

    #[test]
    fn test_duplicate_ids() {
        assert!(ItemTable::new_with_ids(&["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_ids_must_be_variable_names() {
        for id in ["a;b", "c, d", "e+f", "g<h", "i>j", "k=l", "m n", " o", "p\t", ""] {
            let err = ItemTable::new_with_ids(&["ok", id]).unwrap_err();
            assert!(err.to_string().contains(&format!(r#""{}""#, id)));
        }
    }

    #[test]
    fn test_ids_with_allowed_symbols() {
        let table = ItemTable::new_with_ids(&["17", "q_1.2", "x[3]", "y{a}/b", "z&w#$%~'@^"]).unwrap();
        assert_eq!(5, table.n_items());
    }

    #[test]
    fn test_empty_table() {
        let table = ItemTable::new_with_ids(&[] as &[&str]).unwrap();
        assert_eq!(0, table.n_items());
    }

    #[test]
    fn test_add_attribute() {
        let mut table = ItemTable::new_with_ids(&["a", "b"]).unwrap();
        table.add_attribute("Content", &["1", "2"]).unwrap();
        table.add_attribute("Difficulty", &["easy", "hard"]).unwrap();
        assert_eq!(2, table.n_attributes());
        assert_eq!(
            vec!["Content", "Difficulty"],
            table.iter_attribute_names().collect::<Vec<&str>>()
        );
        assert_eq!(&["easy", "hard"], table.attribute("Difficulty").unwrap());
    }

    #[test]
    fn test_add_attribute_wrong_len() {
        let mut table = ItemTable::new_with_ids(&["a", "b"]).unwrap();
        assert!(table.add_attribute("Content", &["1"]).is_err());
        assert_eq!(0, table.n_attributes());
    }

    #[test]
    fn test_add_attribute_twice() {
        let mut table = ItemTable::new_with_ids(&["a"]).unwrap();
        table.add_attribute("Content", &["1"]).unwrap();
        assert!(table.add_attribute("Content", &["2"]).is_err());
        assert_eq!(&["1"], table.attribute("Content").unwrap());
    }

    #[test]
    fn test_unknown_attribute() {
        let table = ItemTable::new_with_ids(&["a"]).unwrap();
        assert!(table.attribute("Content").is_err());
    }
}
