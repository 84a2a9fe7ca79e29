//! ATA compiles Automated Test Assembly problems into integer programs.
//!
//! Items are spread over a number of forms of fixed size, under content bounds
//! expressed per category and per form.
//! The resulting program is written in the lp_solve textual format.

#![warn(missing_docs)]

pub mod constraints;

pub mod encoding;

pub mod io;

pub mod items;
