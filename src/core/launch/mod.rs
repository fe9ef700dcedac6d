pub mod classpath;
pub mod task;

pub use classpath::{build_classpath, compose, LaunchCommand, LaunchRequest, Session};
pub use task::run;
