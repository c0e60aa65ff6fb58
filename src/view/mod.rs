//! Result Rendering
//!
//! A toolkit-free description of the page and a terminal printer for it.

pub mod model;
pub mod terminal;

pub use model::{
    render_result, timeout_banner, transport_banner, Banner, BannerLevel, DiagnosticEntry,
    ErrorsPanel, Inserted, SessionState, SourcePanel, Tab, View,
};
