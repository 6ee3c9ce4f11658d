pub mod apps;
pub mod calls;
pub mod device;
pub mod dispatch;
pub mod intent;
pub mod music;
pub mod notes;
pub mod text;
pub mod time_expr;
