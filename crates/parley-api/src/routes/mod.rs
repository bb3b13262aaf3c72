pub mod page;
pub mod fallback;
