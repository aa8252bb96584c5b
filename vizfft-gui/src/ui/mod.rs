//! # UI Module
//!
//! Layout of the vizfft window: plot panes and the controls sidebar.

pub mod main_display;
