//! The 2D drawing surface effects render into.
//!
//! [`Surface`] is the immediate-mode contract between emitters and whatever
//! presents pixels: a window canvas, the software [`Pixmap`](crate::Pixmap),
//! or the [`RecordingSurface`] used to inspect frames headlessly.
//!
//! # Transforms
//!
//! `rotate` post-multiplies the current transform; `save`/`restore` push and
//! pop it. Every primitive is drawn through the transform in effect when it
//! is issued.

use crate::paint::{Color, Paint};
use glam::{Affine2, Vec2};

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// One path instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathVerb {
    MoveTo(Vec2),
    LineTo(Vec2),
}

/// Reusable polyline buffer.
///
/// Emitters keep one `Path` and `reset` it after every draw, so the
/// pairwise link loop never allocates once the buffer has grown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    verbs: Vec<PathVerb>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new contour at `point`.
    pub fn move_to(&mut self, point: Vec2) {
        self.verbs.push(PathVerb::MoveTo(point));
    }

    /// Extend the current contour to `point`.
    pub fn line_to(&mut self, point: Vec2) {
        self.verbs.push(PathVerb::LineTo(point));
    }

    /// Drop all verbs, keeping the allocation.
    pub fn reset(&mut self) {
        self.verbs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Straight segments described by the path, in order.
    ///
    /// A `LineTo` without a preceding `MoveTo` starts at the origin.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let mut cursor = Vec2::ZERO;
        self.verbs.iter().filter_map(move |verb| match *verb {
            PathVerb::MoveTo(p) => {
                cursor = p;
                None
            }
            PathVerb::LineTo(p) => {
                let from = cursor;
                cursor = p;
                Some((from, p))
            }
        })
    }
}

/// Immediate-mode 2D drawing target.
pub trait Surface {
    /// Surface size in pixels (`width`, `height`).
    fn dimensions(&self) -> (u32, u32);

    /// Replace every pixel with `color`, ignoring the transform.
    fn clear(&mut self, color: Color);

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    fn draw_path(&mut self, path: &Path, paint: &Paint);

    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    /// Oval inscribed in `rect`.
    fn draw_oval(&mut self, rect: Rect, paint: &Paint);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`. Extra calls are ignored.
    fn restore(&mut self);

    /// Rotate subsequent drawing by `degrees` (clockwise on a y-down surface)
    /// about `pivot`.
    fn rotate(&mut self, degrees: f32, pivot: Vec2);
}

/// Affine rotation of `degrees` about `pivot`.
pub fn rotation_about(degrees: f32, pivot: Vec2) -> Affine2 {
    Affine2::from_translation(pivot)
        * Affine2::from_angle(degrees.to_radians())
        * Affine2::from_translation(-pivot)
}

/// Save/restore stack shared by surface implementations.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Affine2,
    saved: Vec<Affine2>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: Affine2::IDENTITY,
            saved: Vec::new(),
        }
    }
}

impl TransformStack {
    #[inline]
    pub fn current(&self) -> Affine2 {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    pub fn rotate(&mut self, degrees: f32, pivot: Vec2) {
        self.current = self.current * rotation_about(degrees, pivot);
    }
}

/// A primitive captured by [`RecordingSurface`], with its resolved color.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        transform: Affine2,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
        transform: Affine2,
    },
    Rect {
        rect: Rect,
        color: Color,
        transform: Affine2,
    },
    Oval {
        rect: Rect,
        color: Color,
        transform: Affine2,
    },
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    transforms: TransformStack,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transforms: TransformStack::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded commands; the transform stack is kept.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.transforms.depth()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }

    pub fn oval_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Oval { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: paint.color,
            transform: self.transforms.current(),
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let transform = self.transforms.current();
        for (from, to) in path.segments() {
            self.commands.push(DrawCommand::Line {
                from,
                to,
                color: paint.color,
                width: paint.stroke_width,
                transform,
            });
        }
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color: paint.color,
            transform: self.transforms.current(),
        });
    }

    fn draw_oval(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::Oval {
            rect,
            color: paint.color,
            transform: self.transforms.current(),
        });
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn rotate(&mut self, degrees: f32, pivot: Vec2) {
        self.transforms.rotate(degrees, pivot);
    }
}
