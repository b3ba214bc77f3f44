pub mod diagnostic;
pub mod src_span;
pub mod error;

#[cfg(test)]
pub(crate) mod sample;

pub mod prelude {
    pub use super::{
        diagnostic::*,
        src_span::*,
        error::*
    };
}
