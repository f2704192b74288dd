//! Rendering helpers shared by the lists and the action picker

pub mod selection;
