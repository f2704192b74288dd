//! Full-pane views that are not list/details pairs

mod not_a_repository;
mod settings;

pub use not_a_repository::{not_a_repository_lines, render_not_a_repository};
pub use settings::{render_settings, settings_lines};
