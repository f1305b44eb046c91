pub mod auth;
pub mod books;
pub mod pages;
pub mod views;
