//! The authoring state machine.
//!
//! An [`AuthoringSession`] owns the committed regions of the loaded image and
//! the single in-progress shape. Pointer and keyboard events arrive one at a
//! time; each is applied completely before the next, and each reports what it
//! did through an [`Effect`].

use crate::geometry::{Geometry, Point, ShapeKind};
use crate::region::{IdAllocator, Region, RegionId, RegionUpdate};

/// Pixel distance from the first vertex within which a click closes a polygon.
pub const DEFAULT_CLOSE_RADIUS: f32 = 15.0;

/// Minimum number of vertices a polygon needs to be committed.
pub const MIN_POLYGON_VERTICES: usize = 3;

// ── Tool / Mode / Input ─────────────────────────────────────────────────────

/// The shape new regions are drawn as.
pub type Tool = ShapeKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Edit,
    Preview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Delete,
}

/// The shape currently being drawn, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InProgress {
    #[default]
    None,
    /// Rectangle or circle between pointer-down and pointer-up.
    Dragging { anchor: Point, geometry: Geometry },
    /// Polygon vertices collected so far, in click order.
    Polygon { vertices: Vec<Point> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawState {
    Idle,
    DrawingRectOrCircle,
    DrawingPolygon,
}

/// Outcome of feeding one event to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Ignored,
    Started,
    Updated,
    Committed(RegionId),
    Discarded,
    Removed(RegionId),
}

impl Effect {
    pub fn changed(&self) -> bool {
        !matches!(self, Effect::Ignored)
    }
}

// ── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct AuthoringSession {
    image_name: Option<String>,
    regions: Vec<Region>,
    ids: IdAllocator,
    tool: Tool,
    mode: Mode,
    in_progress: InProgress,
    selection: Option<RegionId>,
    close_radius: f32,
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new(ShapeKind::Rectangle, DEFAULT_CLOSE_RADIUS)
    }
}

impl AuthoringSession {
    pub fn new(tool: Tool, close_radius: f32) -> Self {
        Self {
            image_name: None,
            regions: Vec::new(),
            ids: IdAllocator::default(),
            tool,
            mode: Mode::Edit,
            in_progress: InProgress::None,
            selection: None,
            close_radius,
        }
    }

    /// Start over for a freshly loaded image. Tool and mode survive; regions,
    /// selection and any half-drawn shape do not.
    pub fn load_image(&mut self, name: impl Into<String>) {
        let name = name.into();
        log::info!(
            "Loaded image {:?}, discarding {} region(s)",
            name,
            self.regions.len()
        );
        self.image_name = Some(name);
        self.regions.clear();
        self.selection = None;
        self.in_progress = InProgress::None;
    }

    pub fn has_image(&self) -> bool {
        self.image_name.is_some()
    }

    pub fn image_name(&self) -> Option<&str> {
        self.image_name.as_deref()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Re-selecting the active tool keeps the draft.
    pub fn set_tool(&mut self, tool: Tool) -> Effect {
        if tool == self.tool {
            return Effect::Ignored;
        }
        self.tool = tool;
        self.discard_in_progress()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) -> Effect {
        self.mode = mode;
        self.discard_in_progress()
    }

    pub fn state(&self) -> DrawState {
        match self.in_progress {
            InProgress::None => DrawState::Idle,
            InProgress::Dragging { .. } => DrawState::DrawingRectOrCircle,
            InProgress::Polygon { .. } => DrawState::DrawingPolygon,
        }
    }

    pub fn in_progress(&self) -> &InProgress {
        &self.in_progress
    }

    pub fn polygon_vertex_count(&self) -> usize {
        match &self.in_progress {
            InProgress::Polygon { vertices } => vertices.len(),
            _ => 0,
        }
    }

    fn accepts_input(&self) -> bool {
        self.mode == Mode::Edit && self.has_image()
    }

    // ── Pointer / keyboard ──────────────────────────────────────────────────

    pub fn pointer_down(&mut self, p: Point) -> Effect {
        if !self.accepts_input() {
            return Effect::Ignored;
        }

        match self.tool {
            ShapeKind::Rectangle | ShapeKind::Circle => {
                if self.in_progress != InProgress::None {
                    return Effect::Ignored;
                }
                let geometry = if self.tool == ShapeKind::Rectangle {
                    Geometry::rect_at(p)
                } else {
                    Geometry::circle_at(p)
                };
                log::debug!("Started {} at ({}, {})", self.tool.label(), p.x, p.y);
                self.in_progress = InProgress::Dragging { anchor: p, geometry };
                Effect::Started
            }
            ShapeKind::Polygon => self.polygon_click(p),
        }
    }

    fn polygon_click(&mut self, p: Point) -> Effect {
        match &mut self.in_progress {
            InProgress::None => {
                log::debug!("Started polygon at ({}, {})", p.x, p.y);
                self.in_progress = InProgress::Polygon { vertices: vec![p] };
                Effect::Started
            }
            InProgress::Polygon { vertices } => {
                let closes = vertices.len() >= MIN_POLYGON_VERTICES
                    && vertices[0].distance_to(p) < self.close_radius;
                if closes {
                    self.finish_polygon()
                } else {
                    vertices.push(p);
                    Effect::Updated
                }
            }
            InProgress::Dragging { .. } => Effect::Ignored,
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> Effect {
        if !self.accepts_input() {
            return Effect::Ignored;
        }
        match &mut self.in_progress {
            InProgress::Dragging { anchor, geometry } => {
                let is_circle = matches!(geometry, Geometry::Circle { .. });
                *geometry = if is_circle {
                    Geometry::circle_through(*anchor, p)
                } else {
                    Geometry::rect_from_corners(*anchor, p)
                };
                Effect::Updated
            }
            _ => Effect::Ignored,
        }
    }

    pub fn pointer_up(&mut self) -> Effect {
        if !self.accepts_input() {
            return Effect::Ignored;
        }
        match std::mem::take(&mut self.in_progress) {
            InProgress::Dragging { geometry, .. } => Effect::Committed(self.commit(geometry)),
            other => {
                self.in_progress = other;
                Effect::Ignored
            }
        }
    }

    pub fn double_click(&mut self) -> Effect {
        if !self.accepts_input() {
            return Effect::Ignored;
        }
        if self.polygon_vertex_count() >= MIN_POLYGON_VERTICES {
            self.finish_polygon()
        } else {
            Effect::Ignored
        }
    }

    pub fn key(&mut self, key: Key) -> Effect {
        if !self.accepts_input() {
            return Effect::Ignored;
        }
        match key {
            Key::Enter if self.polygon_vertex_count() > 0 => self.finish_polygon(),
            Key::Escape if self.state() == DrawState::DrawingPolygon => {
                self.discard_in_progress()
            }
            Key::Delete => match self.selection {
                Some(id) => self.delete(id),
                None => Effect::Ignored,
            },
            _ => Effect::Ignored,
        }
    }

    /// Close the polygon under construction. Fewer than three vertices are
    /// dropped instead of committed.
    fn finish_polygon(&mut self) -> Effect {
        match std::mem::take(&mut self.in_progress) {
            InProgress::Polygon { vertices } if vertices.len() >= MIN_POLYGON_VERTICES => {
                Effect::Committed(self.commit(Geometry::Polygon { vertices }))
            }
            InProgress::Polygon { vertices } => {
                log::debug!("Dropped polygon with {} vertex(es)", vertices.len());
                Effect::Discarded
            }
            other => {
                self.in_progress = other;
                Effect::Ignored
            }
        }
    }

    fn discard_in_progress(&mut self) -> Effect {
        match std::mem::take(&mut self.in_progress) {
            InProgress::None => Effect::Ignored,
            _ => Effect::Discarded,
        }
    }

    fn commit(&mut self, geometry: Geometry) -> RegionId {
        let id = self.ids.allocate();
        log::info!(
            "Committed {} {} as area {}",
            geometry.kind().label(),
            id,
            self.regions.len() + 1
        );
        self.regions.push(Region::new(id, geometry));
        id
    }

    // ── Regions / selection ─────────────────────────────────────────────────

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id() == id)
    }

    /// 1-based position shown to the user. Shifts when earlier regions are
    /// deleted; the id does not.
    pub fn ordinal(&self, id: RegionId) -> Option<usize> {
        self.regions.iter().position(|r| r.id() == id).map(|i| i + 1)
    }

    pub fn selection(&self) -> Option<RegionId> {
        self.selection
    }

    pub fn select(&mut self, id: RegionId) -> Effect {
        if self.region(id).is_none() || self.selection == Some(id) {
            return Effect::Ignored;
        }
        self.selection = Some(id);
        Effect::Updated
    }

    pub fn delete(&mut self, id: RegionId) -> Effect {
        let Some(index) = self.regions.iter().position(|r| r.id() == id) else {
            return Effect::Ignored;
        };
        self.regions.remove(index);
        if self.selection == Some(id) {
            self.selection = None;
        }
        log::info!("Deleted area {} ({})", index + 1, id);
        Effect::Removed(id)
    }

    pub fn clear_regions(&mut self) {
        log::info!("Cleared {} region(s)", self.regions.len());
        self.regions.clear();
        self.selection = None;
    }

    /// Merge link metadata into a region. Returns false for unknown ids.
    pub fn update_region(&mut self, id: RegionId, update: RegionUpdate) -> bool {
        match self.regions.iter_mut().find(|r| r.id() == id) {
            Some(region) => {
                region.apply(update);
                true
            }
            None => false,
        }
    }
}
