use crate::constraints::Constraint;

/// A trait for objects that want to be informed about the progress of an encoding.
///
/// Listeners are registered when building a [`ProblemEncoder`](crate::encoding::ProblemEncoder).
/// The encoding itself never writes diagnostics; it is up to the listeners to log or collect them.
pub trait EncodingListener {
    /// Called each time a category constraint is built.
    ///
    /// The attributes and the category are given as lists, since a constraint may involve several attributes.
    fn category_constraint_built(
        &self,
        _attributes: &[String],
        _category: &[String],
        _constraint: &Constraint,
    ) {
    }

    /// Called once the whole encoding is built.
    fn encoding_built(&self, _n_variables: usize, _n_constraints: usize) {}
}

/// A listener that ignores all the events.
#[derive(Default)]
pub struct NoEncodingListener;

impl EncodingListener for NoEncodingListener {}
