//! Input handling module
//!
//! Routes keyboard and pointer events by focus precedence.

pub mod dispatcher;

pub use dispatcher::{is_quit_chord, route_key, route_mouse};
