pub mod deck;
pub mod event;
