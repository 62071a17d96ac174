// render.rs - Drawing surface seam and the frame command buffer
//
// The simulation never touches a real canvas. It draws through `Canvas`;
// `DrawList` implements it by recording an f32 command stream that the JS
// host replays onto a CanvasRenderingContext2D.
//
// Command encoding (opcode, then operands):
//   0 BACKGROUND     gray
//   1 TRANSLATE      dx dy
//   2 STROKE_WEIGHT  w
//   3 FILL           r g b a      (channels 0-255, alpha 0-1)
//   4 STROKE         r g b a
//   5 NO_STROKE
//   6 ELLIPSE        x y diameter
//   7 LINE           x1 y1 x2 y2

pub const OP_BACKGROUND: f32 = 0.0;
pub const OP_TRANSLATE: f32 = 1.0;
pub const OP_STROKE_WEIGHT: f32 = 2.0;
pub const OP_FILL: f32 = 3.0;
pub const OP_STROKE: f32 = 4.0;
pub const OP_NO_STROKE: f32 = 5.0;
pub const OP_ELLIPSE: f32 = 6.0;
pub const OP_LINE: f32 = 7.0;

/// Opaque color with byte channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unbounded channel values, clamping each into 0..=255.
    pub fn clamped(r: f32, g: f32, b: f32) -> Self {
        let c = |v: f32| v.clamp(0.0, 255.0) as u8;
        Self { r: c(r), g: c(g), b: c(b) }
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r as f32, self.g as f32, self.b as f32, a.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Drawing primitives the simulation needs from its host.
pub trait Canvas {
    fn background(&mut self, gray: f32);
    fn translate(&mut self, dx: f32, dy: f32);
    fn stroke_weight(&mut self, w: f32);
    fn fill(&mut self, color: Rgba);
    fn stroke(&mut self, color: Rgba);
    fn no_stroke(&mut self);
    /// Filled circle centered on (x, y).
    fn ellipse(&mut self, x: f32, y: f32, diameter: f32);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
}

#[derive(Default)]
pub struct DrawList {
    out: Vec<f32>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.out.clear();
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    #[inline]
    fn push(&mut self, op: f32, args: &[f32]) {
        self.out.push(op);
        self.out.extend_from_slice(args);
    }
}

impl Canvas for DrawList {
    fn background(&mut self, gray: f32) {
        self.push(OP_BACKGROUND, &[gray]);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.push(OP_TRANSLATE, &[dx, dy]);
    }

    fn stroke_weight(&mut self, w: f32) {
        self.push(OP_STROKE_WEIGHT, &[w]);
    }

    fn fill(&mut self, c: Rgba) {
        self.push(OP_FILL, &[c.r, c.g, c.b, c.a]);
    }

    fn stroke(&mut self, c: Rgba) {
        self.push(OP_STROKE, &[c.r, c.g, c.b, c.a]);
    }

    fn no_stroke(&mut self) {
        self.push(OP_NO_STROKE, &[]);
    }

    fn ellipse(&mut self, x: f32, y: f32, diameter: f32) {
        self.push(OP_ELLIPSE, &[x, y, diameter]);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(OP_LINE, &[x1, y1, x2, y2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() {
        let mut list = DrawList::new();
        list.background(20.0);
        list.no_stroke();
        list.fill(Rgba::new(1.0, 2.0, 3.0, 0.5));
        list.ellipse(10.0, -4.0, 30.0);

        assert_eq!(
            list.as_slice(),
            &[
                OP_BACKGROUND, 20.0,
                OP_NO_STROKE,
                OP_FILL, 1.0, 2.0, 3.0, 0.5,
                OP_ELLIPSE, 10.0, -4.0, 30.0,
            ]
        );

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn line_and_translate_operands() {
        let mut list = DrawList::new();
        list.translate(300.0, 300.0);
        list.line(1.0, 2.0, 3.0, 4.0);
        assert_eq!(list.len(), 3 + 5);
        assert_eq!(list.as_slice()[3..], [OP_LINE, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn colors_clamp() {
        assert_eq!(Rgb::clamped(-12.0, 300.0, 128.9), Rgb::new(0, 255, 128));
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(1.7).a, 1.0);
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(-0.2).a, 0.0);
    }
}
