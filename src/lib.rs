#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

#[cfg_attr(test, macro_use)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
pub use error::TreeError;

mod rb_tree;
pub use rb_tree::{Iter, RbTree};

mod float_multiset;
pub use float_multiset::FloatMultiset;
