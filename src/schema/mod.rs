pub mod frame;
pub mod selrestr;
pub mod word;
