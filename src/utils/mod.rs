pub mod currency;
pub mod text;
pub mod time;
