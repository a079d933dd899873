//! Overlay drawn on top of the displayed image.
//!
//! The overlay's coordinate space is the image as it appears on screen: its
//! origin is the image's top-left corner and its size follows the image's
//! rendered size. [`LayoutWatcher`] reports when that size becomes known or
//! changes, and [`Overlay::sync`] adopts it. Painting is split in two: the
//! session is turned into a list of [`PaintCmd`]s, which is then handed to an
//! egui painter.

use egui::{Align2, Color32, FontId, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2};

use crate::config::{Color4, EditorConfig};
use crate::geometry::{first_hit, normalize_rect, polygon_bounds, Geometry, Point};
use crate::region::{Region, RegionId};
use crate::session::{AuthoringSession, InProgress, Mode, MIN_POLYGON_VERTICES};

/// Sizes closer than this are treated as unchanged.
const SIZE_EPSILON: f32 = 0.5;
const CIRCLE_SEGMENTS: usize = 64;
const DASH: f32 = 4.0;

/// Size of an image stretched to `available_width`, aspect ratio kept.
pub fn fit_to_width(native: Vec2, available_width: f32) -> Vec2 {
    if native.x <= 0.0 || native.y <= 0.0 || available_width <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = available_width / native.x;
    egui::vec2(available_width, native.y * scale)
}

// ── Layout sync ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutEvent {
    /// The image has been laid out for the first time since subscribing.
    Ready(Vec2),
    /// The image's displayed size changed.
    Resized(Vec2),
}

impl LayoutEvent {
    pub fn size(&self) -> Vec2 {
        match self {
            LayoutEvent::Ready(size) | LayoutEvent::Resized(size) => *size,
        }
    }
}

/// Turns per-frame observations of the image's rendered size into
/// ready/resize notifications.
#[derive(Debug, Default)]
pub struct LayoutWatcher {
    subscribed: bool,
    last: Option<Vec2>,
}

impl LayoutWatcher {
    /// Start (or restart) watching. The next observation is reported as
    /// [`LayoutEvent::Ready`].
    pub fn subscribe(&mut self) {
        self.subscribed = true;
        self.last = None;
    }

    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.last = None;
    }

    pub fn observe(&mut self, size: Vec2) -> Option<LayoutEvent> {
        if !self.subscribed || size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        let event = match self.last {
            None => LayoutEvent::Ready(size),
            Some(last) if (last - size).abs().max_elem() < SIZE_EPSILON => return None,
            Some(_) => LayoutEvent::Resized(size),
        };
        self.last = Some(size);
        Some(event)
    }
}

// ── Paint instructions ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    Selected,
    Hovered,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PaintCmd {
    Region {
        ordinal: usize,
        geometry: Geometry,
        emphasis: Emphasis,
    },
    /// Rectangle or circle still being dragged out.
    Draft(Geometry),
    /// Open edges of the polygon under construction.
    DraftPath(Vec<Point>),
    /// Polygon vertex marker. The first vertex is the close target.
    Vertex { at: Point, close_target: bool },
    Tooltip { text: String, at: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub at: Point,
}

/// What a preview click should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Miss,
    NoLink(RegionId),
    Follow { id: RegionId, link: String },
}

#[derive(Clone, Debug)]
pub struct OverlayStyle {
    pub stroke_width: f32,
    pub vertex_radius: f32,
    pub label_size: f32,
    pub region: Color4,
    pub draft: Color4,
}

impl From<&EditorConfig> for OverlayStyle {
    fn from(config: &EditorConfig) -> Self {
        Self {
            stroke_width: config.stroke_width,
            vertex_radius: config.vertex_radius,
            label_size: config.label_size,
            region: config.region_color.clone(),
            draft: config.draft_color.clone(),
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

// ── Overlay ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Overlay {
    style: OverlayStyle,
    size: Option<Vec2>,
    hovered: Option<RegionId>,
    tooltip: Option<Tooltip>,
}

impl Overlay {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            size: None,
            hovered: None,
            tooltip: None,
        }
    }

    /// Adopt the image's current displayed size.
    pub fn sync(&mut self, event: LayoutEvent) {
        log::debug!("Overlay sync: {:?}", event);
        self.size = Some(event.size());
    }

    /// Forget the synced size, e.g. when the image goes away.
    pub fn detach(&mut self) {
        self.size = None;
        self.clear_hover();
    }

    /// Pin `at` inside the synced image bounds. Unchanged before the first
    /// sync.
    pub fn clamp(&self, at: Point) -> Point {
        match self.size {
            Some(size) => Point::new(at.x.clamp(0.0, size.x), at.y.clamp(0.0, size.y)),
            None => at,
        }
    }

    pub fn hovered(&self) -> Option<RegionId> {
        self.hovered
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    // ── Preview hit-testing ─────────────────────────────────────────────────

    /// Update hover state for a pointer at `at`. Returns true if anything
    /// visible changed.
    pub fn pointer_moved(&mut self, regions: &[Region], at: Point) -> bool {
        let before = (self.hovered, self.tooltip.clone());
        match first_hit(regions, at.x, at.y) {
            Some(region) => {
                self.hovered = Some(region.id());
                self.tooltip = region.tooltip().map(|text| Tooltip {
                    text: text.to_string(),
                    at: Point::new(at.x, at.y - 10.0),
                });
            }
            None => self.clear_hover(),
        }
        before != (self.hovered, self.tooltip.clone())
    }

    pub fn pointer_left(&mut self) {
        self.clear_hover();
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }

    pub fn click(&self, regions: &[Region], at: Point) -> ClickOutcome {
        match first_hit(regions, at.x, at.y) {
            None => ClickOutcome::Miss,
            Some(region) => match region.navigable_link() {
                Some(link) => ClickOutcome::Follow {
                    id: region.id(),
                    link: link.to_string(),
                },
                None => ClickOutcome::NoLink(region.id()),
            },
        }
    }

    // ── Scene ───────────────────────────────────────────────────────────────

    /// Everything to draw for the current state, back to front. Empty until
    /// the overlay has been synced to an image.
    pub fn scene(&self, session: &AuthoringSession) -> Vec<PaintCmd> {
        if self.size.is_none() {
            return Vec::new();
        }

        let mode = session.mode();
        let mut cmds: Vec<PaintCmd> = session
            .regions()
            .iter()
            .enumerate()
            .map(|(i, region)| {
                let emphasis = match mode {
                    Mode::Edit if session.selection() == Some(region.id()) => Emphasis::Selected,
                    Mode::Preview if self.hovered == Some(region.id()) => Emphasis::Hovered,
                    _ => Emphasis::Normal,
                };
                PaintCmd::Region {
                    ordinal: i + 1,
                    geometry: region.geometry().clone(),
                    emphasis,
                }
            })
            .collect();

        match mode {
            Mode::Edit => match session.in_progress() {
                InProgress::None => {}
                InProgress::Dragging { geometry, .. } => cmds.push(PaintCmd::Draft(geometry.clone())),
                InProgress::Polygon { vertices } => {
                    if vertices.len() >= 2 {
                        cmds.push(PaintCmd::DraftPath(vertices.clone()));
                    }
                    cmds.extend(vertices.iter().enumerate().map(|(i, v)| PaintCmd::Vertex {
                        at: *v,
                        close_target: i == 0,
                    }));
                }
            },
            Mode::Preview => {
                if let Some(tip) = &self.tooltip {
                    cmds.push(PaintCmd::Tooltip {
                        text: tip.text.clone(),
                        at: tip.at,
                    });
                }
            }
        }
        cmds
    }

    // ── egui painting ───────────────────────────────────────────────────────

    /// Draw `cmds` with the overlay origin at `origin` (the image's top-left
    /// corner on screen).
    pub fn paint(&self, painter: &egui::Painter, origin: Pos2, cmds: &[PaintCmd]) {
        let s = &self.style;
        let to_screen = |p: Point| origin + egui::vec2(p.x, p.y);

        for cmd in cmds {
            match cmd {
                PaintCmd::Region {
                    ordinal,
                    geometry,
                    emphasis,
                } => {
                    let (fill_alpha, stroke_color) = match emphasis {
                        Emphasis::Normal => (0.1, s.region.to_egui()),
                        Emphasis::Selected => (0.25, s.region.to_egui()),
                        Emphasis::Hovered => (0.3, Color32::WHITE),
                    };
                    let width = if *emphasis == Emphasis::Normal {
                        s.stroke_width
                    } else {
                        s.stroke_width * 1.5
                    };
                    self.paint_geometry(
                        painter,
                        origin,
                        geometry,
                        s.region.with_alpha(fill_alpha),
                        Stroke::new(width, stroke_color),
                    );
                    let (anchor, align) = label_anchor(geometry);
                    self.paint_badge(painter, to_screen(anchor), align, &ordinal.to_string());
                }
                PaintCmd::Draft(geometry) => {
                    let stroke = Stroke::new(s.stroke_width, s.draft.to_egui());
                    let fill = s.draft.with_alpha(0.15);
                    match geometry {
                        Geometry::Rectangle { x1, y1, x2, y2 } => {
                            let r = normalize_rect(*x1, *y1, *x2, *y2);
                            let rect = Rect::from_min_size(
                                to_screen(Point::new(r.left, r.top)),
                                egui::vec2(r.width, r.height),
                            );
                            painter.rect_filled(rect, 0.0, fill);
                            let outline = [
                                rect.left_top(),
                                rect.right_top(),
                                rect.right_bottom(),
                                rect.left_bottom(),
                                rect.left_top(),
                            ];
                            painter.extend(Shape::dashed_line(&outline, stroke, DASH, DASH));
                        }
                        Geometry::Circle { cx, cy, r } => {
                            let center = to_screen(Point::new(*cx, *cy));
                            painter.circle_filled(center, *r, fill);
                            let outline: Vec<Pos2> = (0..=CIRCLE_SEGMENTS)
                                .map(|i| {
                                    let t = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                                    center + egui::vec2(t.cos(), t.sin()) * *r
                                })
                                .collect();
                            painter.extend(Shape::dashed_line(&outline, stroke, DASH, DASH));
                        }
                        Geometry::Polygon { vertices } => {
                            let path: Vec<Pos2> = vertices.iter().map(|v| to_screen(*v)).collect();
                            painter.extend(Shape::dashed_line(&path, stroke, DASH, DASH));
                        }
                    }
                }
                PaintCmd::DraftPath(points) => {
                    let path: Vec<Pos2> = points.iter().map(|v| to_screen(*v)).collect();
                    painter.extend(Shape::dashed_line(
                        &path,
                        Stroke::new(s.stroke_width, s.draft.to_egui()),
                        DASH,
                        DASH,
                    ));
                }
                PaintCmd::Vertex { at, close_target } => {
                    let color = if *close_target {
                        s.region.to_egui()
                    } else {
                        s.draft.to_egui()
                    };
                    painter.circle(
                        to_screen(*at),
                        s.vertex_radius,
                        color,
                        Stroke::new(2.0, Color32::WHITE),
                    );
                }
                PaintCmd::Tooltip { text, at } => {
                    let galley = painter.layout_no_wrap(
                        text.clone(),
                        FontId::proportional(14.0),
                        Color32::WHITE,
                    );
                    let anchor = to_screen(*at);
                    // centered horizontally, sitting above the pointer
                    let min = anchor - egui::vec2(galley.size().x * 0.5, galley.size().y);
                    let bg = Rect::from_min_size(min, galley.size()).expand2(egui::vec2(8.0, 4.0));
                    painter.rect_filled(bg, 6.0, Color32::from_black_alpha(230));
                    painter.galley(min, galley, Color32::WHITE);
                }
            }
        }
    }

    fn paint_geometry(
        &self,
        painter: &egui::Painter,
        origin: Pos2,
        geometry: &Geometry,
        fill: Color32,
        stroke: Stroke,
    ) {
        match geometry {
            Geometry::Rectangle { x1, y1, x2, y2 } => {
                let r = normalize_rect(*x1, *y1, *x2, *y2);
                let rect = Rect::from_min_size(
                    origin + egui::vec2(r.left, r.top),
                    egui::vec2(r.width, r.height),
                );
                painter.rect_filled(rect, 0.0, fill);
                painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Middle);
            }
            Geometry::Circle { cx, cy, r } => {
                painter.circle(origin + egui::vec2(*cx, *cy), *r, fill, stroke);
            }
            Geometry::Polygon { vertices } => {
                let points: Vec<Pos2> = vertices
                    .iter()
                    .map(|v| origin + egui::vec2(v.x, v.y))
                    .collect();
                // egui only fills convex paths correctly
                if is_convex(vertices) {
                    painter.add(Shape::convex_polygon(points, fill, stroke));
                } else {
                    painter.add(Shape::closed_line(points, stroke));
                }
            }
        }
    }

    fn paint_badge(&self, painter: &egui::Painter, at: Pos2, align: Align2, text: &str) {
        let galley = painter.layout_no_wrap(
            text.to_string(),
            FontId::proportional(self.style.label_size),
            Color32::WHITE,
        );
        let rect = align.anchor_size(at, galley.size());
        painter.rect_filled(rect.expand(3.0), 3.0, Color32::from_black_alpha(200));
        painter.galley(rect.min, galley, Color32::WHITE);
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

/// Where a region's ordinal badge goes, in overlay coordinates.
fn label_anchor(geometry: &Geometry) -> (Point, Align2) {
    match geometry {
        Geometry::Rectangle { x1, y1, x2, y2 } => {
            let r = normalize_rect(*x1, *y1, *x2, *y2);
            (Point::new(r.left + 6.0, r.top + 6.0), Align2::LEFT_TOP)
        }
        Geometry::Circle { cx, cy, .. } => (Point::new(*cx, *cy), Align2::CENTER_CENTER),
        Geometry::Polygon { vertices } => match polygon_bounds(vertices) {
            Some(b) => (Point::new(b.min_x + 6.0, b.min_y + 6.0), Align2::LEFT_TOP),
            None => (Point::default(), Align2::LEFT_TOP),
        },
    }
}

/// Every turn goes the same way and the turns add up to exactly one
/// revolution. Stars turn consistently too but wind more than once.
fn is_convex(vertices: &[Point]) -> bool {
    if vertices.len() < MIN_POLYGON_VERTICES {
        return false;
    }
    let n = vertices.len();
    let mut sign = 0.0f32;
    let mut winding = 0.0f32;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let (ux, uy) = (b.x - a.x, b.y - a.y);
        let (vx, vy) = (c.x - b.x, c.y - b.y);
        let cross = ux * vy - uy * vx;
        if cross != 0.0 {
            if sign != 0.0 && cross.signum() != sign {
                return false;
            }
            sign = cross.signum();
        }
        winding += cross.atan2(ux * vx + uy * vy);
    }
    (winding.abs() - std::f32::consts::TAU).abs() < 1e-3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ShapeKind;
    use crate::region::RegionUpdate;
    use crate::session::{Effect, DEFAULT_CLOSE_RADIUS};

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn synced_overlay() -> Overlay {
        let mut overlay = Overlay::default();
        overlay.sync(LayoutEvent::Ready(egui::vec2(400.0, 300.0)));
        overlay
    }

    fn session_with_rects(n: usize) -> (AuthoringSession, Vec<RegionId>) {
        let mut s = AuthoringSession::new(ShapeKind::Rectangle, DEFAULT_CLOSE_RADIUS);
        s.load_image("img.png");
        let mut ids = Vec::new();
        for i in 0..n {
            let o = i as f32 * 10.0;
            s.pointer_down(p(o, o));
            s.pointer_move(p(o + 50.0, o + 50.0));
            if let Effect::Committed(id) = s.pointer_up() {
                ids.push(id);
            }
        }
        (s, ids)
    }

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_to_width(egui::vec2(800.0, 600.0), 400.0), egui::vec2(400.0, 300.0));
        assert_eq!(fit_to_width(egui::vec2(100.0, 50.0), 300.0), egui::vec2(300.0, 150.0));
        assert_eq!(fit_to_width(egui::vec2(0.0, 50.0), 300.0), Vec2::ZERO);
    }

    #[test]
    fn watcher_reports_ready_then_resizes() {
        let mut watcher = LayoutWatcher::default();
        assert_eq!(watcher.observe(egui::vec2(100.0, 50.0)), None);

        watcher.subscribe();
        let size = egui::vec2(100.0, 50.0);
        assert_eq!(watcher.observe(size), Some(LayoutEvent::Ready(size)));
        assert_eq!(watcher.observe(size), None);
        assert_eq!(watcher.observe(egui::vec2(100.2, 50.1)), None);

        let bigger = egui::vec2(200.0, 100.0);
        assert_eq!(watcher.observe(bigger), Some(LayoutEvent::Resized(bigger)));

        watcher.subscribe();
        assert_eq!(watcher.observe(bigger), Some(LayoutEvent::Ready(bigger)));

        watcher.unsubscribe();
        assert_eq!(watcher.observe(size), None);
    }

    #[test]
    fn watcher_ignores_empty_layout() {
        let mut watcher = LayoutWatcher::default();
        watcher.subscribe();
        assert_eq!(watcher.observe(Vec2::ZERO), None);
        assert!(matches!(
            watcher.observe(egui::vec2(10.0, 10.0)),
            Some(LayoutEvent::Ready(_))
        ));
    }

    #[test]
    fn nothing_painted_before_sync() {
        let (s, _) = session_with_rects(2);
        assert!(Overlay::default().scene(&s).is_empty());
    }

    #[test]
    fn scene_orders_regions_then_draft() {
        let (mut s, ids) = session_with_rects(2);
        s.select(ids[1]);
        s.set_tool(ShapeKind::Circle);
        s.pointer_down(p(100.0, 100.0));
        s.pointer_move(p(103.0, 104.0));

        let scene = synced_overlay().scene(&s);
        assert_eq!(scene.len(), 3);
        assert!(matches!(
            scene[0],
            PaintCmd::Region { ordinal: 1, emphasis: Emphasis::Normal, .. }
        ));
        assert!(matches!(
            scene[1],
            PaintCmd::Region { ordinal: 2, emphasis: Emphasis::Selected, .. }
        ));
        assert_eq!(
            scene[2],
            PaintCmd::Draft(Geometry::Circle { cx: 100.0, cy: 100.0, r: 5.0 })
        );
    }

    #[test]
    fn polygon_draft_marks_first_vertex() {
        let mut s = AuthoringSession::new(ShapeKind::Polygon, DEFAULT_CLOSE_RADIUS);
        s.load_image("img.png");
        s.pointer_down(p(0.0, 0.0));

        let scene = synced_overlay().scene(&s);
        assert_eq!(scene, vec![PaintCmd::Vertex { at: p(0.0, 0.0), close_target: true }]);

        s.pointer_down(p(40.0, 0.0));
        let scene = synced_overlay().scene(&s);
        assert_eq!(
            scene,
            vec![
                PaintCmd::DraftPath(vec![p(0.0, 0.0), p(40.0, 0.0)]),
                PaintCmd::Vertex { at: p(0.0, 0.0), close_target: true },
                PaintCmd::Vertex { at: p(40.0, 0.0), close_target: false },
            ]
        );
    }

    #[test]
    fn ordinals_follow_position_after_delete() {
        let (mut s, ids) = session_with_rects(3);
        s.delete(ids[1]);
        let ordinals: Vec<usize> = synced_overlay()
            .scene(&s)
            .iter()
            .filter_map(|cmd| match cmd {
                PaintCmd::Region { ordinal, .. } => Some(*ordinal),
                _ => None,
            })
            .collect();
        assert_eq!(ordinals, vec![1, 2]);
    }

    #[test]
    fn hover_uses_first_hit_and_tooltip() {
        let (mut s, ids) = session_with_rects(2);
        s.update_region(
            ids[0],
            RegionUpdate {
                tooltip_text: Some("First".into()),
                ..Default::default()
            },
        );
        s.set_mode(Mode::Preview);

        let mut overlay = synced_overlay();
        // (20, 20) is inside both rectangles
        assert!(overlay.pointer_moved(s.regions(), p(20.0, 20.0)));
        assert_eq!(overlay.hovered(), Some(ids[0]));
        assert_eq!(
            overlay.tooltip(),
            Some(&Tooltip { text: "First".into(), at: p(20.0, 10.0) })
        );

        let scene = overlay.scene(&s);
        assert!(matches!(scene[0], PaintCmd::Region { emphasis: Emphasis::Hovered, .. }));
        assert!(matches!(scene.last(), Some(PaintCmd::Tooltip { .. })));

        // only the second region covers (58, 58); it has no tooltip
        assert!(overlay.pointer_moved(s.regions(), p(58.0, 58.0)));
        assert_eq!(overlay.hovered(), Some(ids[1]));
        assert_eq!(overlay.tooltip(), None);

        assert!(!overlay.pointer_moved(s.regions(), p(59.0, 59.0)));

        overlay.pointer_left();
        assert_eq!(overlay.hovered(), None);
    }

    #[test]
    fn click_follows_only_real_links() {
        let (mut s, ids) = session_with_rects(2);
        s.update_region(
            ids[0],
            RegionUpdate {
                link: Some("https://example.com".into()),
                ..Default::default()
            },
        );
        s.update_region(
            ids[1],
            RegionUpdate {
                link: Some("#".into()),
                ..Default::default()
            },
        );
        let overlay = synced_overlay();
        assert_eq!(
            overlay.click(s.regions(), p(5.0, 5.0)),
            ClickOutcome::Follow { id: ids[0], link: "https://example.com".into() }
        );
        assert_eq!(overlay.click(s.regions(), p(58.0, 58.0)), ClickOutcome::NoLink(ids[1]));
        assert_eq!(overlay.click(s.regions(), p(300.0, 300.0)), ClickOutcome::Miss);
    }

    #[test]
    fn preview_scene_hides_drafts() {
        let (mut s, _) = session_with_rects(1);
        s.pointer_down(p(0.0, 0.0));
        s.set_mode(Mode::Preview);
        let scene = synced_overlay().scene(&s);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn many_regions_scene() {
        let (s, _) = session_with_rects(300);
        let scene = synced_overlay().scene(&s);
        assert_eq!(scene.len(), 300);
    }

    #[test]
    fn convexity() {
        assert!(is_convex(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]));
        assert!(!is_convex(&[
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(5.0, 3.0),
            p(10.0, 10.0),
            p(0.0, 10.0),
        ]));
        assert!(is_convex(&[p(0.0, 0.0), p(10.0, 0.0), p(5.0, 8.0)]));
    }

    #[test]
    fn star_is_not_convex() {
        let pentagram: Vec<Point> = (0..5)
            .map(|i| {
                let t = (i * 2) as f32 * std::f32::consts::TAU / 5.0;
                p(100.0 + 50.0 * t.sin(), 100.0 - 50.0 * t.cos())
            })
            .collect();
        assert!(!is_convex(&pentagram));
    }

    #[test]
    fn drag_off_the_image_commits_clamped_coords() {
        let (mut s, _) = session_with_rects(0);
        let overlay = synced_overlay();
        s.pointer_down(overlay.clamp(p(10.0, 10.0)));
        s.pointer_move(overlay.clamp(p(-40.0, 900.0)));
        let Effect::Committed(id) = s.pointer_up() else {
            panic!("rectangle not committed");
        };
        assert_eq!(
            s.region(id).map(|r| r.geometry().coords()),
            Some(vec![10.0, 10.0, 0.0, 300.0])
        );
        assert_eq!(Overlay::default().clamp(p(-40.0, 900.0)), p(-40.0, 900.0));
    }
}
