//! Thread count vs. execution time benchmark viewer.
//!
//! The [`data`] layer loads the two measurement tables of a source, [`pipeline`]
//! turns a user selection into a [`pipeline::PreparedView`], and the egui front
//! end ([`app`], [`ui`]) draws it according to a [`config::PresentationConfig`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod state;
pub mod ui;
