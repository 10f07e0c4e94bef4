//! Key prefix resolution for partitioned data.
//!
//! Objects are laid out Hive-style:
//!
//! ```text
//! {environment}/unit={unit_id}/sensor={sensor}/year=YYYY/month=MM/day=DD/...
//! ```

use chrono::{NaiveDate, Utc};
use lm_error::{LmError, Result};
use lm_types::{LookupEvent, PrefixStrategy};

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Build the key prefix a lookup searches under.
///
/// # Arguments
///
/// * `strategy` - Partitioned (event-derived) or static prefix
/// * `event` - The request's partition; required for [`PrefixStrategy::Partitioned`]
/// * `date` - The day partition to search, normally [`today_utc`]
///
/// # Errors
///
/// Returns [`LmError::Configuration`] if the partitioned strategy is used
/// without an event, or if a path component is empty or contains `/`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use lm_locator::resolve_prefix;
/// use lm_types::{LookupEvent, PrefixStrategy};
///
/// let strategy = PrefixStrategy::Partitioned { environment: "prod".to_string() };
/// let event = LookupEvent::new("42", "temp");
/// let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
///
/// let prefix = resolve_prefix(&strategy, Some(&event), date).unwrap();
/// assert_eq!(prefix, "prod/unit=42/sensor=temp/year=2024/month=03/day=07");
/// ```
pub fn resolve_prefix(
    strategy: &PrefixStrategy,
    event: Option<&LookupEvent>,
    date: NaiveDate,
) -> Result<String> {
    match strategy {
        PrefixStrategy::Static { prefix } => Ok(prefix.clone()),
        PrefixStrategy::Partitioned { environment } => {
            let event = event.ok_or_else(|| {
                LmError::Configuration(
                    "partitioned prefix requires a unit_id and sensor".to_string(),
                )
            })?;

            check_component("environment", environment)?;
            check_component("unit_id", &event.unit_id)?;
            check_component("sensor", &event.sensor)?;

            Ok(format!(
                "{}/unit={}/sensor={}/{}",
                environment,
                event.unit_id,
                event.sensor,
                date.format("year=%Y/month=%m/day=%d")
            ))
        }
    }
}

fn check_component(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LmError::Configuration(format!("{name} is empty")));
    }
    if value.contains('/') {
        return Err(LmError::Configuration(format!(
            "{name} '{value}' must not contain '/'"
        )));
    }
    Ok(())
}
