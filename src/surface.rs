//! Surface kinds
//!
//! The closed set of front-facing surfaces a host application can present. Raw values
//! coming from host lifecycle code are clamped into this set with [`SurfaceKind::normalize`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of slots a registry keeps (one per kind, `None` and `Other` included).
pub const SURFACE_KIND_COUNT: usize = 6;

/// A front-facing surface of the host application
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SurfaceKind {
    /// No surface; the initial and reset value of the current kind.
    #[default]
    None = 0,
    /// Application-wide root context.
    App = 1,
    /// Primary (console) surface. Default fallback for context resolution.
    Primary = 2,
    Graphics = 3,
    Web = 4,
    /// Catch-all for raw values outside the known range.
    Other = 5,
}

impl SurfaceKind {
    /// All kinds in slot order.
    pub const ALL: [SurfaceKind; SURFACE_KIND_COUNT] = [
        SurfaceKind::None,
        SurfaceKind::App,
        SurfaceKind::Primary,
        SurfaceKind::Graphics,
        SurfaceKind::Web,
        SurfaceKind::Other,
    ];

    /// Map a raw host value onto a kind. Anything outside `0..5` becomes `Other`.
    pub fn normalize(raw: i32) -> SurfaceKind {
        match raw {
            0 => SurfaceKind::None,
            1 => SurfaceKind::App,
            2 => SurfaceKind::Primary,
            3 => SurfaceKind::Graphics,
            4 => SurfaceKind::Web,
            _ => SurfaceKind::Other,
        }
    }

    /// Slot index of this kind.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::None => "none",
            SurfaceKind::App => "app",
            SurfaceKind::Primary => "primary",
            SurfaceKind::Graphics => "graphics",
            SurfaceKind::Web => "web",
            SurfaceKind::Other => "other",
        }
    }
}

impl From<i32> for SurfaceKind {
    fn from(raw: i32) -> Self {
        SurfaceKind::normalize(raw)
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
