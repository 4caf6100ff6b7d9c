use chrono::{NaiveDate, Utc};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub const DAY_FMT: &str = "%Y-%m-%d";

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time.format(DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }
}

// Clock supplies the evaluation date for loan rules
pub trait Clock: Sync + Send {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_FMT).ok()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{Clock, FixedClock, parse_day, serializer, DATE_FMT};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "serializer")]
        at: NaiveDateTime,
    }

    #[tokio::test]
    async fn test_should_serialize_date_time() {
        let stamp = Stamp { at: NaiveDateTime::parse_from_str("2023-04-12T12:12:12.5", DATE_FMT).unwrap() };
        let json = serde_json::to_string(&stamp).unwrap();
        assert!(json.contains("2023-04-12T12:12:12"));
        let loaded: Stamp = serde_json::from_str(json.as_str()).unwrap();
        assert_eq!(stamp, loaded);
    }

    #[tokio::test]
    async fn test_should_use_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(day, FixedClock::new(day).today());
        assert_eq!(Some(day), parse_day("2024-01-10"));
        assert_eq!(None, parse_day("10/01/2024"));
    }
}
