pub mod book;
pub mod conversion;
pub mod raw;

pub use book::*;
pub use conversion::*;
pub use raw::*;
