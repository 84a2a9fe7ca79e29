use super::{DecisionVariable, EncodingListener, NoEncodingListener};
use crate::{
    constraints::{
        split_multi_attribute_key, tuple_bounds, write_lp_constraint, CategoryConstraintSet,
        Comparator, ConstraintSpec,
    },
    items::ItemTable,
};
use anyhow::{anyhow, Context, Result};
use std::io::Write;

/// Encodes the assignment of items to forms as a binary integer program.
///
/// There is a decision variable for each couple (item, form), named after the item identifier and the form index.
/// The program contains:
/// * a trivial objective, since the problem is a feasibility one;
/// * a uniqueness constraint for each item, stating it is placed in at most one form;
/// * a size constraint for each form, stating it contains exactly the expected number of items;
/// * for each form, the category constraints of the specification;
/// * the declaration of all the decision variables as binary.
///
/// All the configuration errors (unknown attributes, invalid categories, ...) are detected when the encoder is built,
/// so writing the program may only fail because of I/O errors.
/// The encoder does not check the feasibility of the program.
///
/// # Example
///
/// ```
/// # use ata::constraints::{ConstraintSpec, Rule};
/// # use ata::encoding::ProblemEncoder;
/// # use ata::items::ItemTable;
/// # use indexmap::IndexMap;
/// let mut table = ItemTable::new_with_ids(&["a", "b", "c"]).unwrap();
/// table.add_attribute("Content", &["1", "2", "1"]).unwrap();
/// let mut spec = ConstraintSpec::default();
/// let mut values = IndexMap::new();
/// values.insert("1".to_string(), 1);
/// spec.add_rule("Content", Rule::new("<=", values).unwrap());
/// let encoder = ProblemEncoder::new(&table, &spec, 2, 1).unwrap();
/// let program = encoder.to_lp_string();
/// assert!(program.starts_with("min: ;\n"));
/// assert!(program.ends_with("bin a_0, b_0, c_0, a_1, b_1, c_1;\n"));
/// ```
pub struct ProblemEncoder {
    n_forms: usize,
    items_per_form: usize,
    variable_names: Vec<String>,
    item_occurrences: Vec<Vec<String>>,
    form_members: Vec<Vec<String>>,
    category_sets: Vec<CategoryConstraintSet>,
}

impl ProblemEncoder {
    /// Builds a new encoder.
    ///
    /// # Arguments
    ///
    /// * `table` - the items and their attributes
    /// * `spec` - the content constraints
    /// * `n_forms` - the number of forms to build
    /// * `items_per_form` - the number of items in each form
    pub fn new(
        table: &ItemTable,
        spec: &ConstraintSpec,
        n_forms: usize,
        items_per_form: usize,
    ) -> Result<Self> {
        Self::new_with_listener(table, spec, n_forms, items_per_form, &NoEncodingListener)
    }

    /// Builds a new encoder, informing a listener about the built constraints.
    ///
    /// See [`new`](Self::new) for more information.
    pub fn new_with_listener(
        table: &ItemTable,
        spec: &ConstraintSpec,
        n_forms: usize,
        items_per_form: usize,
        listener: &dyn EncodingListener,
    ) -> Result<Self> {
        if n_forms == 0 {
            return Err(anyhow!("the number of forms must be positive"));
        }
        let ids = table.ids();
        let item_occurrences = ids
            .iter()
            .map(|id| {
                (0..n_forms)
                    .map(|f| DecisionVariable::new(id, f).to_string())
                    .collect()
            })
            .collect::<Vec<Vec<String>>>();
        let form_members = (0..n_forms)
            .map(|f| {
                ids.iter()
                    .map(|id| DecisionVariable::new(id, f).to_string())
                    .collect()
            })
            .collect::<Vec<Vec<String>>>();
        let variable_names = form_members.iter().flatten().cloned().collect();
        let mut category_sets = Vec::with_capacity(spec.n_rules());
        for (key, rules) in spec.iter() {
            let context = || format!(r#"while building constraints for attribute "{}""#, key);
            let attributes = split_multi_attribute_key(key);
            let classifications = attributes
                .iter()
                .map(|a| table.attribute(a))
                .collect::<Result<Vec<&[String]>>>()
                .with_context(context)?;
            for rule in rules {
                let set = if attributes.len() == 1 {
                    CategoryConstraintSet::new(
                        &attributes[0],
                        classifications[0],
                        rule.comparator(),
                        rule.values(),
                        ids,
                    )
                } else {
                    tuple_bounds(rule, attributes.len()).and_then(|bounds| {
                        CategoryConstraintSet::new_multi(
                            &attributes,
                            &classifications,
                            rule.comparator(),
                            &bounds,
                            ids,
                        )
                    })
                };
                let set = set.with_context(context)?;
                set.iter().for_each(|(category, constraint)| {
                    listener.category_constraint_built(set.attributes(), category, constraint)
                });
                category_sets.push(set);
            }
        }
        let encoder = ProblemEncoder {
            n_forms,
            items_per_form,
            variable_names,
            item_occurrences,
            form_members,
            category_sets,
        };
        listener.encoding_built(encoder.n_variables(), encoder.n_constraints());
        Ok(encoder)
    }

    /// Returns the number of items.
    pub fn n_items(&self) -> usize {
        self.item_occurrences.len()
    }

    /// Returns the number of forms.
    pub fn n_forms(&self) -> usize {
        self.n_forms
    }

    /// Returns the number of items in each form.
    pub fn items_per_form(&self) -> usize {
        self.items_per_form
    }

    /// Returns the number of decision variables.
    pub fn n_variables(&self) -> usize {
        self.variable_names.len()
    }

    /// Returns the names of all the decision variables, form by form.
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Returns the names of the variables of an item, one for each form.
    ///
    /// # Panics
    ///
    /// Panics if the item index is out of bounds.
    pub fn item_occurrences(&self, item: usize) -> &[String] {
        &self.item_occurrences[item]
    }

    /// Returns the names of the variables of a form, one for each item.
    ///
    /// # Panics
    ///
    /// Panics if the form index is out of bounds.
    pub fn form_members(&self, form: usize) -> &[String] {
        &self.form_members[form]
    }

    /// Returns the category constraint sets, independent of the forms.
    pub fn category_constraint_sets(&self) -> &[CategoryConstraintSet] {
        &self.category_sets
    }

    /// Returns the number of category constraints, all forms included.
    pub fn n_category_constraints(&self) -> usize {
        self.category_sets.iter().map(|s| s.len()).sum::<usize>() * self.n_forms
    }

    /// Returns the number of constraints of the program.
    pub fn n_constraints(&self) -> usize {
        self.n_items() + self.n_forms + self.n_category_constraints()
    }

    /// Returns `true` if the forms require more items than the table provides.
    ///
    /// In this case, the program has no solution.
    pub fn lacks_items(&self) -> bool {
        self.items_per_form
            .checked_mul(self.n_forms)
            .map(|n| n > self.n_items())
            .unwrap_or(true)
    }

    /// Writes the program using the lp_solve format.
    pub fn write_lp(&self, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing the lp_solve program";
        writeln!(writer, "min: ;").context(context)?;
        for occurrences in self.item_occurrences.iter() {
            write_lp_constraint(writer, occurrences, Comparator::AtMost, 1).context(context)?;
        }
        for members in self.form_members.iter() {
            write_lp_constraint(writer, members, Comparator::Equal, self.items_per_form)
                .context(context)?;
        }
        for form in 0..self.n_forms {
            for set in self.category_sets.iter() {
                set.write_lp(form, writer).context(context)?;
            }
        }
        writeln!(writer, "bin {};", self.variable_names.join(", ")).context(context)?;
        writer.flush().context(context)
    }

    /// Returns the program using the lp_solve format.
    pub fn to_lp_string(&self) -> String {
        let mut buffer = Vec::new();
        self.write_lp(&mut buffer)
            .expect("writing to a vector cannot fail");
        String::from_utf8(buffer).expect("decision variables are valid UTF-8")
    }
}
