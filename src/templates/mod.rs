pub mod docs;
pub mod page;
