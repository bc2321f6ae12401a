pub mod authoring;
pub mod catalog;
pub mod constellation;
pub mod registry;

pub use catalog::Catalog;
pub use constellation::StarSize;
pub use registry::ConstellationManager;
