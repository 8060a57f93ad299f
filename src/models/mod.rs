pub mod acquisition;
pub mod coordinate;
pub mod star;

pub use acquisition::AcquisitionMetadata;
pub use coordinate::{CoordinateRecord, CoordinateTable};
pub use star::{StarColumn, StarTable, StarValue};
