pub mod camera;
pub mod shape_instance;
