use super::Comparator;
use crate::encoding::DecisionVariable;
use std::{fmt::Display, io::Write};

/// A bound on the number of items selected in a form among a fixed set of items.
///
/// This object is used to write constraints like "select at most 2 items about content area A".
/// If the items from content area A are `x1`, `x3` and `x5`, the constraint for the form `0` is written
///
/// ```text
/// x1_0 + x3_0 + x5_0<=2;
/// ```
///
/// The same constraint can be written for any form, by changing the form index of its variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    item_ids: Vec<String>,
    comparator: Comparator,
    bound: i64,
}

impl Constraint {
    /// Builds a new constraint.
    ///
    /// # Arguments
    ///
    /// * `item_ids` - the identifiers of the items involved in the constraint
    /// * `comparator` - the comparator
    /// * `bound` - the bound on the number of selected items
    pub fn new(item_ids: Vec<String>, comparator: Comparator, bound: i64) -> Self {
        Constraint {
            item_ids,
            comparator,
            bound,
        }
    }

    /// Returns the identifiers of the items involved in this constraint.
    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    /// Returns the comparator of this constraint.
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Returns the bound of this constraint.
    pub fn bound(&self) -> i64 {
        self.bound
    }

    /// Returns `true` iff no item is involved in this constraint.
    ///
    /// Such constraints are still written, with an empty left-hand side.
    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    /// Writes this constraint for the given form, using the lp_solve format.
    ///
    /// # Example
    ///
    /// ```
    /// # use ata::constraints::{Comparator, Constraint};
    /// let c = Constraint::new(vec!["x5".to_string(), "x7".to_string()], Comparator::AtMost, 1);
    /// let mut buffer = Vec::new();
    /// c.write_lp(2, &mut buffer).unwrap();
    /// assert_eq!("x5_2 + x7_2<=1;\n", String::from_utf8(buffer).unwrap());
    /// ```
    pub fn write_lp(&self, form: usize, writer: &mut dyn Write) -> std::io::Result<()> {
        write_lp_constraint(
            writer,
            self.item_ids
                .iter()
                .map(|id| DecisionVariable::new(id, form)),
            self.comparator,
            self.bound,
        )
    }

    /// Returns this constraint for the given form as a line of an lp_solve program.
    pub fn to_lp_string(&self, form: usize) -> String {
        let mut buffer = Vec::new();
        self.write_lp(form, &mut buffer)
            .expect("writing to a vector cannot fail");
        String::from_utf8(buffer).expect("decision variables are valid UTF-8")
    }
}

/// Writes a linear constraint in which all the variables have a unit coefficient.
///
/// Variables are separated by `" + "`, and the comparator and the bound follow the last one without separator.
/// The line ends with `";\n"`.
///
/// # Example
///
/// ```
/// # use ata::constraints::{write_lp_constraint, Comparator};
/// let mut buffer = Vec::new();
/// write_lp_constraint(&mut buffer, ["a_0", "a_1"], Comparator::AtMost, 1).unwrap();
/// assert_eq!("a_0 + a_1<=1;\n", String::from_utf8(buffer).unwrap());
/// ```
pub fn write_lp_constraint<I, V, B>(
    writer: &mut dyn Write,
    variables: I,
    comparator: Comparator,
    bound: B,
) -> std::io::Result<()>
where
    I: IntoIterator<Item = V>,
    V: Display,
    B: Display,
{
    let mut first = true;
    for v in variables {
        if first {
            first = false;
            write!(writer, "{}", v)?;
        } else {
            write!(writer, " + {}", v)?;
        }
    }
    writeln!(writer, "{}{};", comparator, bound)
}
