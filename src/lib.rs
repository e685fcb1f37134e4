pub mod anchor;
pub mod colors;
pub mod components;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_bus;
pub mod event_loop;
pub mod faces;
pub mod keybindings;
pub mod lifecycle;
pub mod options;
pub mod picker;
pub mod placement;
pub mod registry;
pub mod render_loop;
pub mod theme;
pub mod time_state;
pub mod tracing_sub;
pub mod ui;

pub use anchor::AnchorField;
pub use error::{PickerError, Result};
pub use event_bus::{EventBus, Topic};
pub use faces::{ClockFace, FaceContext, FaceFactory, FaceRegistry};
pub use lifecycle::Visibility;
pub use options::{OptionOverrides, PickerOptions};
pub use picker::TimePicker;
pub use placement::{AnchorRect, PanelGeometry, PanelSize, PlacementMetrics, place_panel};
pub use registry::PickerRegistry;
pub use time_state::{TimeHandle, TimeState};
