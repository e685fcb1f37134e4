//! Shared crate-wide constants.

use std::time::Duration;

/// How long a blur waits before it is allowed to close the picker.
///
/// Pressing the mouse inside the floating panel moves focus away from the
/// anchor before the press reaches the canvas. The deferred check gives that
/// press time to mark the picker as interacted so the panel stays open.
pub const BLUR_GRACE: Duration = Duration::from_millis(200);

/// Hour used when the anchor text carries no parsable time.
pub const DEFAULT_HOUR: u32 = 12;

/// Minute used when the anchor text carries no parsable time.
pub const DEFAULT_MINUTE: u32 = 0;

/// Preferred outer size of the floating panel, borders included.
///
/// Units: terminal cells. The canvas gets everything but the border and the
/// button row, which keeps the braille dial close to round on common fonts.
pub const PANEL_WIDTH: u16 = 34;
pub const PANEL_HEIGHT: u16 = 18;

/// Face identifier used when neither the options nor the anchor name one.
pub const DEFAULT_FACE: &str = "12";

/// Attribute the registry reads the face identifier from.
pub const FACE_ATTRIBUTE: &str = "data-mode";

/// Viewport assumed until the host reports its real size.
pub const DEFAULT_VIEWPORT_WIDTH: u16 = 80;
pub const DEFAULT_VIEWPORT_HEIGHT: u16 = 24;
