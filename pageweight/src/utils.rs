use log::{info, log_enabled, Level};

/// Log an activity line when info logging is enabled.
pub fn log(message: &'static str, data: impl AsRef<str>) {
    if log_enabled!(Level::Info) {
        info!("{message} - {}", data.as_ref());
    }
}
