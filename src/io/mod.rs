pub mod bundled;
pub mod csv;
pub mod organisms;
