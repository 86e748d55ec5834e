//! Creation timestamps for entries.

use chrono::Utc;
use hole_config::Namespace;

use crate::bundle::Env;
use crate::entry::Entry;
use crate::error::{AppError, Result};
use crate::plugin::Plugin;

/// Config key selecting the timestamp format.
pub const KEY_TIME_FORMAT: &str = "time.format";

/// Entry property holding the timestamp.
pub const TIME_PROPERTY: &str = "time";

/// Stamps every new entry with a `time` property.
///
/// `time.format` is `millis` (Unix epoch milliseconds, the default) or
/// `rfc3339`.
#[derive(Debug, Default)]
pub struct TimePlugin;

impl TimePlugin {
    pub const NAME: &'static str = "time";

    pub fn construct(_env: &Env) -> Box<dyn Plugin> {
        Box::new(Self)
    }
}

impl Plugin for TimePlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn config_keys(&self) -> Vec<&'static str> {
        vec![KEY_TIME_FORMAT]
    }

    fn apply_defaults(&self, defaults: &mut Namespace) -> hole_config::Result<()> {
        defaults.set(KEY_TIME_FORMAT, "millis")
    }

    fn on_create_entry(&self, entry: &mut Entry, config: &Namespace) -> Result<()> {
        let now = Utc::now();
        let stamp = match config.get_str(KEY_TIME_FORMAT).unwrap_or("millis") {
            "millis" => now.timestamp_millis().to_string(),
            "rfc3339" => now.to_rfc3339(),
            other => {
                return Err(AppError::InvalidArgument {
                    value: other.to_string(),
                    reason: format!("{KEY_TIME_FORMAT} must be 'millis' or 'rfc3339'"),
                });
            }
        };
        entry.set(TIME_PROPERTY, stamp);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn config(format: &str) -> Namespace {
        let mut ns = Namespace::new([KEY_TIME_FORMAT]);
        ns.set(KEY_TIME_FORMAT, format).unwrap();
        ns
    }

    #[test]
    fn test_default_format_is_millis() {
        let mut ns = Namespace::new([KEY_TIME_FORMAT]);
        TimePlugin.apply_defaults(&mut ns).unwrap();
        assert_eq!(ns.get_str(KEY_TIME_FORMAT), Some("millis"));

        let before = Utc::now().timestamp_millis();
        let mut entry = Entry::new(1);
        TimePlugin.on_create_entry(&mut entry, &ns).unwrap();
        let stamp: i64 = entry.get(TIME_PROPERTY).unwrap().parse().unwrap();
        assert!(stamp >= before);
    }

    #[test]
    fn test_rfc3339_format() {
        let mut entry = Entry::new(1);
        TimePlugin
            .on_create_entry(&mut entry, &config("rfc3339"))
            .unwrap();
        assert!(DateTime::parse_from_rfc3339(entry.get(TIME_PROPERTY).unwrap()).is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let mut entry = Entry::new(1);
        let err = TimePlugin
            .on_create_entry(&mut entry, &config("iso"))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument { ref value, .. } if value == "iso"));
        assert!(entry.get(TIME_PROPERTY).is_err());
    }
}
