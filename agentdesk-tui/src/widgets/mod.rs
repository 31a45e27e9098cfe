//! Reusable widget components.

pub mod detail;
pub mod form;
pub mod status;

pub use detail::DetailPanel;
pub use form::FormWidget;
pub use status::SliceStatus;
