/// Linear RGB tint multiplied into the texture (or used alone when untextured).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB hex value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry primitive the host renderer instantiates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Flat annulus in the entity's local XZ plane.
    Ring { inner_radius: f32, outer_radius: f32 },
    /// Circle line in the world XZ plane centered on the entity.
    OrbitPath { radius: f32 },
}

impl Shape {
    /// Wire code written into `RenderInstance::shape`.
    pub fn code(&self) -> f32 {
        match self {
            Shape::Sphere { .. } => 0.0,
            Shape::Ring { .. } => 1.0,
            Shape::OrbitPath { .. } => 2.0,
        }
    }
}

/// Component for renderable geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub color: Color,
    /// Texture name resolved through the texture registry at render time.
    pub texture: Option<String>,
    /// HDR glow multiplier (0.0 = lit normally).
    pub emissive: f32,
    pub opacity: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere { radius: 1.0 },
            color: Color::default(),
            texture: None,
            emissive: 0.0,
            opacity: 1.0,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: Color) -> Self {
        Self::new(Shape::Sphere { radius }, color)
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, color: Color) -> Self {
        Self::new(Shape::Ring { inner_radius, outer_radius }, color)
    }

    pub fn orbit_path(radius: f32, color: Color) -> Self {
        Self::new(Shape::OrbitPath { radius }, color)
    }

    pub fn with_texture(mut self, name: impl Into<String>) -> Self {
        self.texture = Some(name.into());
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}
