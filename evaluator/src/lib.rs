//! Turns resolved completion paths into values and member references the host can run.

mod error;
mod literal;
mod reference;

#[cfg(test)]
mod tests;

pub use error::EvalError;
pub use literal::{Value, literal_value};
pub use reference::{
    Argument, MAX_NESTING, MemberItem, MemberReference, Root, to_member_reference,
};
