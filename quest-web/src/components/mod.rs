pub mod continent_card;
pub mod difficulty_picker;
pub mod footer;
pub mod modal;
pub mod notice;
