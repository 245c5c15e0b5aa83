pub mod entry;

pub use entry::{DisplayItem, Entry};
