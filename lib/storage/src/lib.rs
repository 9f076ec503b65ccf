pub mod file;
pub mod memory;

pub use file::FileCategoryStore;
pub use memory::InMemoryCategoryStore;
