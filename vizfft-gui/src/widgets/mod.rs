//! # Widgets Module
//!
//! Custom canvas widgets used by the vizfft window.

pub mod drag_pad;
