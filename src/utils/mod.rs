pub mod image_ops;

// Re-export commonly used items
pub use image_ops::{encode_jpeg_async, jpeg_base64_payload, transport_base64};
