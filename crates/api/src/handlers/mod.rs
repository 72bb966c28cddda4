pub mod books;
pub mod pages;
