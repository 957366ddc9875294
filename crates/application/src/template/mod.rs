//! Template filling: generic placeholder substitution and built-in
//! variable interpolation.

mod interpolation;
mod placeholder;

pub use interpolation::Interpolator;
pub use placeholder::{
    Variables, has_placeholders, substitute, substitute_known, substitute_value,
    substitute_value_known,
};
