mod platform;

use std::path::PathBuf;

use platform::config::DEFAULT_CONFIG_FILE;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    platform::run_app(&config_path)
}
