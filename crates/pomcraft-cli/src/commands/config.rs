use clap::Subcommand;
use pomcraft_core::SettingsStore;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a single setting value
    Get {
        /// Setting name, e.g. work_duration
        key: String,
    },
    /// Update a single setting value
    Set {
        key: String,
        value: String,
    },
    /// Print the full settings document as JSON
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = SettingsStore::open_default()?;
    match action {
        ConfigAction::Get { key } => {
            let value = match key.as_str() {
                "work_duration" => store.work_duration().to_string(),
                "short_break_duration" => store.short_break_duration().to_string(),
                "long_break_duration" => store.long_break_duration().to_string(),
                "sessions_until_long_break" => store.sessions_until_long_break().to_string(),
                "auto_start_breaks" => store.auto_start_breaks().to_string(),
                "auto_start_pomodoros" => store.auto_start_pomodoros().to_string(),
                "notification_sound" => store.notification_sound().to_string(),
                "api_key" => store.api_key().to_string(),
                "theme" => store.theme().to_string(),
                other => return Err(format!("unknown config key: {other}").into()),
            };
            println!("{value}");
        }
        ConfigAction::Set { key, value } => match key.as_str() {
            "work_duration" => store.set_work_duration(value.parse()?),
            "short_break_duration" => store.set_short_break_duration(value.parse()?),
            "long_break_duration" => store.set_long_break_duration(value.parse()?),
            "sessions_until_long_break" => store.set_sessions_until_long_break(value.parse()?),
            "auto_start_breaks" => store.set_auto_start_breaks(value.parse()?),
            "auto_start_pomodoros" => store.set_auto_start_pomodoros(value.parse()?),
            "notification_sound" => store.set_notification_sound(value.parse()?),
            "api_key" => store.set_api_key(value),
            "theme" => store.set_theme(value),
            other => return Err(format!("unknown config key: {other}").into()),
        },
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(store.settings())?);
        }
    }
    Ok(())
}
