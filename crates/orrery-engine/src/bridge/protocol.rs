/// Shared frame buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 12 floats]
/// [Instances: max_instances × 16 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame so the host can
/// compute offsets without sharing constants.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraPose;
use crate::renderer::instance::RenderInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_VIEWPORT_WIDTH: usize = 6;
pub const HEADER_VIEWPORT_HEIGHT: usize = 7;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section. Fixed wire format.
pub const CAMERA_FLOATS: usize = CameraPose::FLOATS;

/// Floats per render instance. Fixed wire format.
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per UI event: kind, a, b, c. Fixed wire format.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub instance_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

/// Everything that goes into one frame of the shared buffer.
pub struct FrameData<'a> {
    pub frame: u32,
    pub viewport: [f32; 2],
    pub camera: &'a CameraPose,
    pub instances: &'a [RenderInstance],
    pub events: &'a [GameEvent],
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let event_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_events,
            camera_offset,
            instance_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }

    /// Serialize a frame into `out`, resizing it to the full buffer length.
    /// Instances and events beyond capacity are truncated.
    pub fn write_frame(&self, data: &FrameData<'_>, out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let instances = &data.instances[..data.instances.len().min(self.max_instances)];
        let events = &data.events[..data.events.len().min(self.max_events)];

        out[HEADER_FRAME_COUNTER] = data.frame as f32;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        out[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = events.len() as f32;
        out[HEADER_VIEWPORT_WIDTH] = data.viewport[0];
        out[HEADER_VIEWPORT_HEIGHT] = data.viewport[1];

        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(data.camera));
        out[self.camera_offset..self.camera_offset + CAMERA_FLOATS].copy_from_slice(camera);

        let inst: &[f32] = bytemuck::cast_slice(instances);
        out[self.instance_data_offset..self.instance_data_offset + inst.len()].copy_from_slice(inst);

        let ev: &[f32] = bytemuck::cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + ev.len()].copy_from_slice(ev);
    }
}
