//! Host compatibility patching.
//!
//! Chromium-style hosts render through nested "Intermediate D3D Window"
//! children that paint over any sibling surface unless they clip siblings.
//! Before the overlay exists, every such descendant gets `WS_CLIPSIBLINGS`
//! and the host itself gets `WS_CLIPCHILDREN`.
//!
//! The windows belong to another process. Each style write is best effort;
//! a refused write is logged and the walk continues.

use host_window::style::{self, CLIP_CHILDREN, CLIP_SIBLINGS};
use host_window::WindowTree;

/// What a patch pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Descendants visited, at any depth.
    pub visited: usize,
    /// Descendants whose class name carried the marker.
    pub matched: usize,
    /// Marker descendants that needed and received `CLIP_SIBLINGS`.
    pub patched: usize,
    /// Style writes the window refused.
    pub failed: usize,
    /// Whether the host needed and received `CLIP_CHILDREN`.
    pub host_patched: bool,
}

impl PatchReport {
    /// True when the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.patched == 0 && !self.host_patched
    }
}

/// Patch `host` and its descendants in `tree`.
///
/// Idempotent: a second pass over an already-patched tree reports
/// `is_noop()`.
pub fn patch_host<T: WindowTree>(tree: &T, host: T::Node, marker: &str) -> PatchReport {
    let mut report = PatchReport::default();

    for node in tree.descendants(host) {
        report.visited += 1;

        let Some(class_name) = tree.class_name(node) else {
            continue;
        };
        if !class_name.contains(marker) {
            continue;
        }
        report.matched += 1;

        if let Some(patched) = style::with_bits(tree.style(node), CLIP_SIBLINGS) {
            if tree.set_style(node, patched) {
                report.patched += 1;
            } else {
                report.failed += 1;
                log::warn!("[patcher] Could not set CLIP_SIBLINGS on '{}'", class_name);
            }
        }
    }

    if let Some(patched) = style::with_bits(tree.style(host), CLIP_CHILDREN) {
        if tree.set_style(host, patched) {
            report.host_patched = true;
        } else {
            report.failed += 1;
            log::warn!("[patcher] Could not set CLIP_CHILDREN on host");
        }
    }

    log::info!(
        "[patcher] visited={} matched={} patched={} host_patched={} failed={}",
        report.visited,
        report.matched,
        report.patched,
        report.host_patched,
        report.failed
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const MARKER: &str = "Intermediate D3D Window";

    struct FakeWindow {
        class_name: Option<String>,
        style: u32,
        parent: Option<usize>,
        read_only: bool,
    }

    /// In-memory window tree; node 0 is the host.
    struct FakeTree {
        windows: RefCell<Vec<FakeWindow>>,
    }

    impl FakeTree {
        fn new(host_style: u32) -> Self {
            Self {
                windows: RefCell::new(vec![FakeWindow {
                    class_name: Some("Chrome_WidgetWin_1".to_string()),
                    style: host_style,
                    parent: None,
                    read_only: false,
                }]),
            }
        }

        fn add(&self, parent: usize, class_name: &str, style: u32) -> usize {
            let mut windows = self.windows.borrow_mut();
            windows.push(FakeWindow {
                class_name: Some(class_name.to_string()),
                style,
                parent: Some(parent),
                read_only: false,
            });
            windows.len() - 1
        }

        fn set_read_only(&self, node: usize) {
            self.windows.borrow_mut()[node].read_only = true;
        }

        fn forget_class(&self, node: usize) {
            self.windows.borrow_mut()[node].class_name = None;
        }

        fn is_descendant(&self, node: usize, root: usize) -> bool {
            let windows = self.windows.borrow();
            let mut current = windows[node].parent;
            while let Some(p) = current {
                if p == root {
                    return true;
                }
                current = windows[p].parent;
            }
            false
        }
    }

    impl WindowTree for FakeTree {
        type Node = usize;

        fn descendants(&self, root: usize) -> Vec<usize> {
            let count = self.windows.borrow().len();
            (0..count).filter(|&n| self.is_descendant(n, root)).collect()
        }

        fn class_name(&self, node: usize) -> Option<String> {
            self.windows.borrow()[node].class_name.clone()
        }

        fn style(&self, node: usize) -> u32 {
            self.windows.borrow()[node].style
        }

        fn set_style(&self, node: usize, style: u32) -> bool {
            let mut windows = self.windows.borrow_mut();
            if windows[node].read_only {
                return false;
            }
            windows[node].style = style;
            true
        }
    }

    #[test]
    fn patches_marker_descendants_and_host() {
        let tree = FakeTree::new(0x1000_0000);
        let render = tree.add(0, MARKER, 0x4000_0000);
        let other = tree.add(0, "Chrome_RenderWidgetHostHWND", 0x4000_0000);

        let report = patch_host(&tree, 0, MARKER);

        assert_eq!(report.visited, 2);
        assert_eq!(report.matched, 1);
        assert_eq!(report.patched, 1);
        assert!(report.host_patched);
        assert_ne!(tree.style(render) & CLIP_SIBLINGS, 0);
        assert_eq!(tree.style(other) & CLIP_SIBLINGS, 0);
        assert_ne!(tree.style(0) & CLIP_CHILDREN, 0);
    }

    #[test]
    fn reaches_indirectly_nested_surfaces() {
        let tree = FakeTree::new(0);
        let a = tree.add(0, "Chrome_WidgetWin_0", 0);
        let b = tree.add(a, "Chrome_RenderWidgetHostHWND", 0);
        let deep = tree.add(b, MARKER, 0);

        let report = patch_host(&tree, 0, MARKER);

        assert_eq!(report.visited, 3);
        assert_eq!(report.patched, 1);
        assert_eq!(tree.style(deep), CLIP_SIBLINGS);
    }

    #[test]
    fn matches_marker_as_substring() {
        let tree = FakeTree::new(0);
        let n = tree.add(0, "Intermediate D3D Window_2", 0);

        patch_host(&tree, 0, MARKER);

        assert_eq!(tree.style(n), CLIP_SIBLINGS);
    }

    #[test]
    fn preserves_existing_style_bits() {
        let tree = FakeTree::new(0x00CF_0000);
        let n = tree.add(0, MARKER, 0x5000_0000);

        patch_host(&tree, 0, MARKER);

        assert_eq!(tree.style(n), 0x5000_0000 | CLIP_SIBLINGS);
        assert_eq!(tree.style(0), 0x00CF_0000 | CLIP_CHILDREN);
    }

    #[test]
    fn second_pass_is_noop() {
        let tree = FakeTree::new(0);
        let n = tree.add(0, MARKER, 0);

        let first = patch_host(&tree, 0, MARKER);
        let style_after_first = (tree.style(0), tree.style(n));
        let second = patch_host(&tree, 0, MARKER);

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_eq!(second.matched, 1);
        assert_eq!((tree.style(0), tree.style(n)), style_after_first);
    }

    #[test]
    fn already_patched_tree_is_untouched() {
        let tree = FakeTree::new(CLIP_CHILDREN);
        tree.add(0, MARKER, CLIP_SIBLINGS);

        let report = patch_host(&tree, 0, MARKER);

        assert!(report.is_noop());
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn refused_write_does_not_stop_the_walk() {
        let tree = FakeTree::new(0);
        let locked = tree.add(0, MARKER, 0);
        let open = tree.add(0, MARKER, 0);
        tree.set_read_only(locked);

        let report = patch_host(&tree, 0, MARKER);

        assert_eq!(report.failed, 1);
        assert_eq!(report.patched, 1);
        assert_eq!(tree.style(open), CLIP_SIBLINGS);
        assert!(report.host_patched);
    }

    #[test]
    fn windows_without_class_name_are_skipped() {
        let tree = FakeTree::new(0);
        let n = tree.add(0, MARKER, 0);
        tree.forget_class(n);

        let report = patch_host(&tree, 0, MARKER);

        assert_eq!(report.visited, 1);
        assert_eq!(report.matched, 0);
        assert_eq!(tree.style(n), 0);
    }

    #[test]
    fn host_without_children_still_gets_clip_children() {
        let tree = FakeTree::new(0);

        let report = patch_host(&tree, 0, MARKER);

        assert_eq!(report.visited, 0);
        assert!(report.host_patched);
        assert_eq!(tree.style(0), CLIP_CHILDREN);
    }
}
