pub mod star_writer;

pub use star_writer::StarWriter;
