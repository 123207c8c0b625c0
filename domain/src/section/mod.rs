//! Discovery sections: the seven categories and the section entity.

pub mod category;
pub mod entities;

pub use category::{SectionCategory, UnknownCategoryError};
pub use entities::Section;
