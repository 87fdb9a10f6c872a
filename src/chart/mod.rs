//! Chart layer: analysis modes, chart specs and the builder that maps one
//! to the other.
//!
//! ```text
//!   AnalysisMode ──┐
//!   PassengerTable ├──► builder::build_chart ──► ChartSpec ──► ui::plot
//!   NumericView  ──┘                                 │
//!                                                    └──► export (JSON)
//! ```

pub mod builder;
pub mod export;
pub mod mode;
pub mod selection;
pub mod spec;

pub use builder::build_chart;
pub use mode::AnalysisMode;
pub use spec::ChartSpec;
