mod settings;

pub use settings::{
    LogFormat, LogSettings, load_settings, load_settings_from_file, load_settings_with,
};
