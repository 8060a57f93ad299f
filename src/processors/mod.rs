pub mod coordinate_transformer;

pub use coordinate_transformer::{
    normalize_image_name, CoordinateTransformer, TransformOptions, TransformReport,
};
