pub mod info;
pub mod space;
