mod arena;
mod page;
mod vector;

pub use arena::*;
pub use page::*;
pub use vector::*;
