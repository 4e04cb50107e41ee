//! Intersection Observer API
//!
//! Observe element visibility and intersection with the viewport.
//! Rects are in document coordinates; the host supplies the viewport rect
//! (scroll offset and size) each time it asks for a check.

use folio_dom::{DOMRect, NodeId};

use crate::RuntimeError;

/// Root margin, one value per edge in px (negative shrinks the root)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Parse the CSS shorthand (`"10px"`, `"0px 0px -50px 0px"`, ...)
    ///
    /// Only `px` (or unitless zero) values are accepted.
    pub fn parse(text: &str) -> Result<Self, RuntimeError> {
        let invalid = || RuntimeError::InvalidRootMargin(text.to_string());

        let values = text
            .split_whitespace()
            .map(|part| {
                let number = part.strip_suffix("px").unwrap_or(part);
                let value: f64 = number.parse().map_err(|_| invalid())?;
                if !part.ends_with("px") && value != 0.0 {
                    return Err(invalid());
                }
                Ok(value)
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(invalid()),
        };
        Ok(Self { top, right, bottom, left })
    }

    /// Apply to a root rect
    pub fn apply(&self, root: DOMRect) -> DOMRect {
        root.inflate(self.top, self.right, self.bottom, self.left)
    }
}

/// Intersection observer options
#[derive(Debug, Clone)]
pub struct IntersectionObserverOptions {
    /// Root margin
    pub root_margin: RootMargin,
    /// Thresholds to trigger callback
    pub threshold: Vec<f64>,
}

impl Default for IntersectionObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            threshold: vec![0.0],
        }
    }
}

impl IntersectionObserverOptions {
    /// Build options, validating thresholds
    pub fn new(root_margin: &str, threshold: Vec<f64>) -> Result<Self, RuntimeError> {
        if let Some(&bad) = threshold.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(RuntimeError::InvalidThreshold(bad));
        }
        let mut threshold = threshold;
        if threshold.is_empty() {
            threshold.push(0.0);
        }
        threshold.sort_by(f64::total_cmp);
        Ok(Self {
            root_margin: RootMargin::parse(root_margin)?,
            threshold,
        })
    }

    fn min_threshold(&self) -> f64 {
        self.threshold.first().copied().unwrap_or(0.0)
    }

    /// How many thresholds the ratio has reached
    fn threshold_index(&self, ratio: f64, intersects: bool) -> usize {
        if !intersects {
            return 0;
        }
        self.threshold.iter().filter(|&&t| ratio >= t).count()
    }
}

/// Intersection observer entry
#[derive(Debug, Clone)]
pub struct IntersectionObserverEntry {
    pub target: NodeId,
    pub bounding_client_rect: DOMRect,
    pub intersection_rect: DOMRect,
    pub root_bounds: DOMRect,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
    pub time: u64,
}

/// Intersection observer
#[derive(Debug, Default)]
pub struct IntersectionObserver {
    options: IntersectionObserverOptions,
    /// Targets in observation order with their last threshold index
    observed: Vec<(NodeId, Option<usize>)>,
    pending_entries: Vec<IntersectionObserverEntry>,
}

impl IntersectionObserver {
    pub fn new(options: IntersectionObserverOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
            pending_entries: Vec::new(),
        }
    }

    pub fn options(&self) -> &IntersectionObserverOptions {
        &self.options
    }

    /// Observe an element
    pub fn observe(&mut self, target: NodeId) {
        if !self.observed.iter().any(|(n, _)| *n == target) {
            self.observed.push((target, None));
        }
    }

    /// Stop observing
    pub fn unobserve(&mut self, target: NodeId) {
        self.observed.retain(|(n, _)| *n != target);
    }

    /// Disconnect all
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.pending_entries.clear();
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Check intersections against the viewport
    ///
    /// An entry is queued for a target on its first check and whenever its
    /// visible ratio crosses one of the thresholds.
    pub fn check_intersections<F>(&mut self, viewport: DOMRect, rect_of: F, time: u64)
    where
        F: Fn(NodeId) -> Option<DOMRect>,
    {
        let root = self.options.root_margin.apply(viewport);
        let min_threshold = self.options.min_threshold();

        for (node, last_index) in &mut self.observed {
            let Some(rect) = rect_of(*node) else {
                continue;
            };
            let intersection = rect.intersection(&root);
            let ratio = match intersection {
                Some(i) if rect.area() > 0.0 => i.area() / rect.area(),
                Some(_) => 1.0,
                None => 0.0,
            };
            let index = self.options.threshold_index(ratio, intersection.is_some());

            if *last_index == Some(index) {
                continue;
            }
            *last_index = Some(index);

            let is_intersecting = intersection.is_some() && ratio >= min_threshold;
            tracing::trace!("Intersection change {:?}: ratio={:.3} intersecting={}", node, ratio, is_intersecting);

            self.pending_entries.push(IntersectionObserverEntry {
                target: *node,
                bounding_client_rect: rect,
                intersection_rect: intersection.unwrap_or_default(),
                root_bounds: root,
                intersection_ratio: ratio,
                is_intersecting,
                time,
            });
        }
    }

    /// Take pending entries
    pub fn take_entries(&mut self) -> Vec<IntersectionObserverEntry> {
        std::mem::take(&mut self.pending_entries)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_entries.is_empty()
    }
}
