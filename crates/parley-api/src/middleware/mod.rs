pub mod logging;
pub mod timeout;
