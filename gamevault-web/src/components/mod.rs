pub mod auth_modal;
pub mod field;
pub mod game_card;
pub mod game_detail;
pub mod header;
pub mod modal;
pub mod pagination;
pub mod star_rating;
pub mod toast;
