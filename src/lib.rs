pub mod libs;

pub use crate::libs::io::{read_to_string, reader, writer};
