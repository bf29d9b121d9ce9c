pub mod ai;
pub mod backup;
pub mod dispatch;
pub mod env;
pub mod health;
