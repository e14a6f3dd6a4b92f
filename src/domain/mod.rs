pub mod dispatch;
pub mod mapping;
pub mod release;
