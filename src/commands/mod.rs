pub mod clone;
pub mod sort;
pub mod status;

pub use clone::clone;
pub use sort::sort;
pub use status::status;
