use bytemuck::{Pod, Zeroable};

/// Per-instance render data written to the shared buffer for the host renderer.
/// 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sphere radius, ring outer radius or orbit path radius.
    pub radius: f32,
    /// Ring inner radius (0 for other shapes).
    pub inner_radius: f32,
    /// Rotation about world Y, in radians.
    pub spin: f32,
    /// Rotation about local X, in radians.
    pub tilt: f32,
    /// 0 = sphere, 1 = ring, 2 = orbit path.
    pub shape: f32,
    /// Texture id, or -1 for untextured.
    pub texture: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub emissive: f32,
    pub opacity: f32,
    pub _pad: [f32; 2],
}

impl RenderInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_TEXTURE: f32 = -1.0;
}

/// Render buffer containing all instances for the current frame, in scene order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false (and drops it) once capacity is reached.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 16);
    }

    #[test]
    fn render_buffer_respects_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        assert!(buf.push(RenderInstance::default()));
        assert!(buf.push(RenderInstance::default()));
        assert!(!buf.push(RenderInstance::default()));
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
