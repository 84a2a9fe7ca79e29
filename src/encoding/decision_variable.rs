use std::fmt::Display;

/// The binary decision variable telling whether an item is placed in a form.
///
/// Its name is the item identifier followed by an underscore and the form index.
///
/// # Example
///
/// ```
/// # use ata::encoding::DecisionVariable;
/// let var = DecisionVariable::new("item12", 3);
/// assert_eq!("item12_3", var.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecisionVariable<'a> {
    item_id: &'a str,
    form: usize,
}

impl<'a> DecisionVariable<'a> {
    /// Builds the variable associated with an item and a form.
    pub fn new(item_id: &'a str, form: usize) -> Self {
        DecisionVariable { item_id, form }
    }

    /// Returns the identifier of the item.
    pub fn item_id(&self) -> &'a str {
        self.item_id
    }

    /// Returns the index of the form.
    pub fn form(&self) -> usize {
        self.form
    }
}

impl Display for DecisionVariable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.item_id, self.form)
    }
}
