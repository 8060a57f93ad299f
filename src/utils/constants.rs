/// Input column names
pub const IMAGE_NAME_COLUMN: &str = "image_name";
pub const X_COORD_COLUMN: &str = "x_coord";
pub const Y_COORD_COLUMN: &str = "y_coord";
pub const SCORE_COLUMN: &str = "score";

/// Columns that every coordinate table must carry
pub const REQUIRED_COLUMNS: [&str; 3] = [IMAGE_NAME_COLUMN, X_COORD_COLUMN, Y_COORD_COLUMN];

/// Input field delimiter
pub const INPUT_DELIMITER: u8 = b'\t';

/// Processing defaults
pub const DEFAULT_IMAGE_EXT: &str = ".mrc";
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// STAR output layout
pub const DEFAULT_STAR_BLOCK: &str = "images";
pub const STAR_LABEL_PREFIX: &str = "_rln";
pub const STAR_MISSING_VALUE: &str = "nan";

/// Environment variable prefix for layered settings
pub const ENV_PREFIX: &str = "COORD2STAR";
pub const ENV_SEPARATOR: &str = "__";
