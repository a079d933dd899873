use std::fmt;

use crate::geometry::{Geometry, ShapeKind};

/// Stable identity of a region. Never reused within a session, even after
/// deletion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh ids in increasing order.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> RegionId {
        self.next += 1;
        RegionId(self.next)
    }
}

// ── Region ──────────────────────────────────────────────────────────────────

/// A committed, clickable area of the image.
///
/// The shape and geometry are fixed once the region exists; only the link
/// metadata can be edited afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    id: RegionId,
    geometry: Geometry,
    pub link: Option<String>,
    pub alt_text: Option<String>,
    pub tooltip_text: Option<String>,
}

impl Region {
    pub fn new(id: RegionId, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            link: None,
            alt_text: None,
            tooltip_text: None,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn shape(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Link to follow on click. `None` when unset or the `#` placeholder.
    pub fn navigable_link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .filter(|link| !link.is_empty() && *link != "#")
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip_text.as_deref().filter(|t| !t.is_empty())
    }

    /// Merge a partial metadata update. Empty strings clear the field.
    pub fn apply(&mut self, update: RegionUpdate) {
        if let Some(link) = update.link {
            self.link = non_empty(link);
        }
        if let Some(alt) = update.alt_text {
            self.alt_text = non_empty(alt);
        }
        if let Some(tooltip) = update.tooltip_text {
            self.tooltip_text = non_empty(tooltip);
        }
    }
}

impl AsRef<Geometry> for Region {
    fn as_ref(&self) -> &Geometry {
        &self.geometry
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Partial update from the property editor. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionUpdate {
    pub link: Option<String>,
    pub alt_text: Option<String>,
    pub tooltip_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn ids_are_monotonic() {
        let mut ids = IdAllocator::default();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn partial_update_merges() {
        let mut ids = IdAllocator::default();
        let mut region = Region::new(ids.allocate(), Geometry::rect_at(Point::new(1.0, 2.0)));
        region.apply(RegionUpdate {
            link: Some("https://example.com".into()),
            tooltip_text: Some("Hello".into()),
            ..Default::default()
        });
        assert_eq!(region.link.as_deref(), Some("https://example.com"));
        assert_eq!(region.tooltip(), Some("Hello"));
        assert_eq!(region.alt_text, None);

        region.apply(RegionUpdate {
            alt_text: Some("A door".into()),
            ..Default::default()
        });
        assert_eq!(region.link.as_deref(), Some("https://example.com"));
        assert_eq!(region.alt_text.as_deref(), Some("A door"));

        region.apply(RegionUpdate {
            link: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(region.link, None);
    }

    #[test]
    fn placeholder_link_is_not_navigable() {
        let mut ids = IdAllocator::default();
        let mut region = Region::new(ids.allocate(), Geometry::circle_at(Point::new(0.0, 0.0)));
        assert_eq!(region.navigable_link(), None);
        region.link = Some("#".into());
        assert_eq!(region.navigable_link(), None);
        region.link = Some("not a url at all".into());
        assert_eq!(region.navigable_link(), Some("not a url at all"));
    }
}
