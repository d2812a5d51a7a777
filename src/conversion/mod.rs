//! Conversion of native simulation collision shapes to canonical collision geometries.
//!
//! The simulation's capsules and cylinders are aligned with the local `x` axis whereas
//! the canonical ones are aligned with `z`: their pose is post-multiplied by a fixed
//! rotation of 90° about the local `y` axis, at construction and at every refresh.

pub use self::shape_converter::{
    axis_correction, convert_collision_shapes, convert_shape, shape_world_pose, ConversionError,
    FrameMode,
};

mod shape_converter;
