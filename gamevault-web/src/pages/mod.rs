pub mod cart;
pub mod catalog;
pub mod library;
pub mod wishlist;
