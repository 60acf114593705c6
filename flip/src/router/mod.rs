pub mod dispatch;
pub mod pair;
