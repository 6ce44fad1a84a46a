//! Cascading technique selector.
//!
//! A row of selectors where the value chosen in one step decides the
//! candidates of the next, with a thumbnail per step and a shared preview.
//! [`CascadeController`] holds the steps; everything visual is derived from it.

pub mod controller;
pub mod error;
pub mod step;

pub use controller::{CascadeController, CascadeEnd, CascadeOutcome};
pub use error::{CascadeError, Result};
pub use step::{ImageSlot, ImageSource, Preview, SelectOption, Selector, Step};
