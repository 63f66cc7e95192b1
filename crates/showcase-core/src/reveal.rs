// One-shot reveal tracking for elements entering the viewport
use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealOptions {
    /// Fraction of the element that must be inside the viewport
    pub threshold: f32,
    /// Added to the viewport's bottom edge; negative values shrink it
    pub bottom_margin: i32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: -40,
        }
    }
}

/// Vertical extent, in whatever unit the surface uses (pixels, rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub top: i32,
    pub height: i32,
}

impl Extent {
    pub fn new(top: i32, height: i32) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// Share of `element` inside `viewport` once the bottom margin is applied
pub fn intersection_ratio(element: Extent, viewport: Extent, bottom_margin: i32) -> f32 {
    if element.height <= 0 {
        return 0.0;
    }
    let view_bottom = viewport.bottom() + bottom_margin;
    let overlap = element.bottom().min(view_bottom) - element.top.max(viewport.top);
    if overlap <= 0 {
        0.0
    } else {
        overlap as f32 / element.height as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry<K> {
    pub target: K,
    pub ratio: f32,
}

/// Tracks which elements have been revealed
///
/// Each element flips to visible the first time it crosses the threshold and
/// is never hidden again. Without an observation primitive everything is
/// revealed up front.
#[derive(Debug)]
pub struct RevealAnimator<K: Eq + Hash + Clone> {
    options: RevealOptions,
    observed: HashSet<K>,
    visible: HashSet<K>,
}

impl<K: Eq + Hash + Clone> RevealAnimator<K> {
    pub fn start(
        elements: impl IntoIterator<Item = K>,
        options: RevealOptions,
        observation_supported: bool,
    ) -> Self {
        let elements: HashSet<K> = elements.into_iter().collect();

        if observation_supported {
            debug!("Observing {} elements for reveal", elements.len());
            Self {
                options,
                observed: elements,
                visible: HashSet::new(),
            }
        } else {
            debug!("No viewport observation, revealing {} elements", elements.len());
            Self {
                options,
                observed: HashSet::new(),
                visible: elements,
            }
        }
    }

    pub fn options(&self) -> RevealOptions {
        self.options
    }

    /// Feed observation results; returns what became visible in this batch
    pub fn on_intersections(&mut self, entries: impl IntoIterator<Item = IntersectionEntry<K>>) -> Vec<K> {
        let mut revealed = Vec::new();
        for entry in entries {
            if entry.ratio > 0.0
                && entry.ratio >= self.options.threshold
                && self.observed.remove(&entry.target)
            {
                self.visible.insert(entry.target.clone());
                revealed.push(entry.target);
            }
        }
        revealed
    }

    pub fn is_visible(&self, key: &K) -> bool {
        self.visible.contains(key)
    }

    pub fn is_observing(&self, key: &K) -> bool {
        self.observed.contains(key)
    }

    /// True once every element has been revealed
    pub fn is_finished(&self) -> bool {
        self.observed.is_empty()
    }

    /// Stop observing; pending elements stay hidden
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target: &'static str, ratio: f32) -> IntersectionEntry<&'static str> {
        IntersectionEntry { target, ratio }
    }

    #[test]
    fn test_unsupported_reveals_everything() {
        let animator = RevealAnimator::start(["a", "b"], RevealOptions::default(), false);
        assert!(animator.is_visible(&"a"));
        assert!(animator.is_visible(&"b"));
        assert!(animator.is_finished());
    }

    #[test]
    fn test_threshold_and_one_shot() {
        let mut animator = RevealAnimator::start(["a", "b"], RevealOptions::default(), true);
        assert!(!animator.is_visible(&"a"));

        assert!(animator.on_intersections([entry("a", 0.05)]).is_empty());
        assert_eq!(animator.on_intersections([entry("a", 0.1), entry("b", 0.0)]), vec!["a"]);
        assert!(animator.is_visible(&"a"));
        assert!(!animator.is_observing(&"a"));

        // leaving and re-entering changes nothing
        assert!(animator.on_intersections([entry("a", 0.0), entry("a", 1.0)]).is_empty());
        assert!(animator.is_visible(&"a"));
        assert!(!animator.is_finished());

        assert_eq!(animator.on_intersections([entry("b", 0.5)]), vec!["b"]);
        assert!(animator.is_finished());
    }

    #[test]
    fn test_reveal_order_follows_intersections() {
        let mut animator = RevealAnimator::start(["top", "bottom"], RevealOptions::default(), true);
        assert_eq!(animator.on_intersections([entry("bottom", 1.0)]), vec!["bottom"]);
        assert_eq!(animator.on_intersections([entry("top", 1.0)]), vec!["top"]);
    }

    #[test]
    fn test_disconnect_leaves_pending_hidden() {
        let mut animator = RevealAnimator::start(["a"], RevealOptions::default(), true);
        animator.disconnect();
        assert!(animator.on_intersections([entry("a", 1.0)]).is_empty());
        assert!(!animator.is_visible(&"a"));
    }

    #[test]
    fn test_intersection_ratio_with_margin() {
        let viewport = Extent::new(0, 100);

        assert_eq!(intersection_ratio(Extent::new(10, 20), viewport, 0), 1.0);
        assert_eq!(intersection_ratio(Extent::new(90, 20), viewport, 0), 0.5);
        assert_eq!(intersection_ratio(Extent::new(100, 20), viewport, 0), 0.0);

        // a negative bottom margin pulls the trigger line up
        assert_eq!(intersection_ratio(Extent::new(70, 20), viewport, -40), 0.0);
        assert_eq!(intersection_ratio(Extent::new(50, 20), viewport, -40), 0.5);

        assert_eq!(intersection_ratio(Extent::new(-10, 20), viewport, 0), 0.5);
        assert_eq!(intersection_ratio(Extent::new(5, 0), viewport, 0), 0.0);
    }
}
