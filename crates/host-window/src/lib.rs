pub mod bounds;
pub mod style;

#[cfg(windows)]
mod win;

#[cfg(windows)]
pub use win::{DesktopTree, WindowImpl};

use std::str::FromStr;

#[cfg(windows)]
use bounds::PhysicalBounds;

/// A window owned by another process that this crate only observes and
/// patches. Never destroyed from here.
#[cfg(windows)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostWindow(WindowImpl);

#[cfg(windows)]
impl HostWindow {
    pub fn from_id(id: &WindowId) -> Self {
        Self(WindowImpl::from_raw(id.raw()))
    }

    pub fn id(&self) -> WindowId {
        WindowId(self.0.raw_id())
    }

    pub fn raw_handle(&self) -> &WindowImpl {
        &self.0
    }

    pub fn is_alive(&self) -> bool {
        self.0.is_alive()
    }

    pub fn class_name(&self) -> Option<String> {
        self.0.class_name()
    }

    pub fn physical_bounds(&self) -> Option<PhysicalBounds> {
        self.0.physical_bounds()
    }

    pub fn style(&self) -> u32 {
        self.0.style()
    }

    pub fn set_style(&self, style: u32) -> bool {
        self.0.set_style(style)
    }

    pub fn descendants(&self) -> Vec<Self> {
        self.0.descendants().into_iter().map(Self).collect()
    }
}

/// Window handle as passed on the command line: a base-10 integer. Signed so
/// that sign-extended 32-bit handles round-trip.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct WindowId(i64);

impl WindowId {
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WindowId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("Invalid window handle '{}': expected a base-10 integer", s))
    }
}

/// Read/write view over a tree of windows.
///
/// All mutation is best effort: a node that refuses a style change reports
/// `false` and the walk carries on.
pub trait WindowTree {
    type Node: Copy;

    /// Every descendant of `root`, at any nesting depth.
    fn descendants(&self, root: Self::Node) -> Vec<Self::Node>;

    fn class_name(&self, node: Self::Node) -> Option<String>;

    fn style(&self, node: Self::Node) -> u32;

    fn set_style(&self, node: Self::Node, style: u32) -> bool;
}
