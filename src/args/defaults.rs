/// Identifying header value sent with every request.
pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadwrk/", env!("CARGO_PKG_VERSION"));

/// Config filenames checked in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["loadwrk.toml", "loadwrk.json"];
