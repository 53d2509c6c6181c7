//! Accessibility-tree perception for DeskPilot.
//!
//! Walks the foreground window's accessibility tree behind the [`AccessTree`]
//! port and extracts a numbered catalogue of interactive elements with pixel
//! geometry. Traversal is depth-bounded, failure-tolerant at node granularity,
//! and aware of browser shells whose interesting controls live below an inner
//! render surface.

pub mod classify;
pub mod errors;
pub mod mock;
pub mod model;
pub mod ports;
pub mod scanner;

pub use classify::{classify_window, WindowClass};
pub use errors::AccessError;
pub use mock::{MockAccessTree, MockNode};
pub use model::{ControlRole, NodeInfo};
pub use ports::{AccessTree, DescendantQuery};
pub use scanner::{ScannerConfig, UiScanner, RENDER_SURFACE_CLASS};
