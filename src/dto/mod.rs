//! Display-ready shapes bridging the views with the terminal renderer.

pub mod lead;
