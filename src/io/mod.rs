//! Reading and writing geometry as plain text.

mod text;

pub use text::{
    load_environment, load_guards, load_polygon, read_environment, read_guards, read_polygon,
    save_environment, save_guards, save_polygon, write_environment, write_guards, write_polygon,
    WriteOptions,
};
