//! The translation of an item table and a constraint specification into an lp_solve program.

mod decision_variable;
pub use decision_variable::DecisionVariable;

mod listener;
pub use listener::EncodingListener;
pub use listener::NoEncodingListener;

mod problem_encoder;
pub use problem_encoder::ProblemEncoder;
