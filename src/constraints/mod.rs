//! Content constraints on forms and their specification.

mod category_constraint_set;
pub use category_constraint_set::CategoryConstraintSet;

mod comparator;
pub use comparator::Comparator;

mod constraint;
pub use constraint::write_lp_constraint;
pub use constraint::Constraint;

mod constraint_spec;
pub(crate) use constraint_spec::tuple_bounds;
pub use constraint_spec::split_multi_attribute_key;
pub use constraint_spec::ConstraintSpec;
pub use constraint_spec::Rule;
pub use constraint_spec::MULTI_ATTRIBUTE_SEPARATOR;
