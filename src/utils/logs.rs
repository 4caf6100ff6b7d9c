// required to enable CloudWatch error logging by the runtime, LMS_LOG_LEVEL overrides INFO
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(log_level(std::env::var("LMS_LOG_LEVEL").ok()))
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .init();
}

fn log_level(value: Option<String>) -> tracing::Level {
    value.and_then(|l| l.parse::<tracing::Level>().ok()).unwrap_or(tracing::Level::INFO)
}

#[cfg(test)]
mod tests {
    use crate::utils::logs::log_level;

    #[tokio::test]
    async fn test_should_parse_log_level() {
        assert_eq!(tracing::Level::DEBUG, log_level(Some("debug".to_string())));
        assert_eq!(tracing::Level::INFO, log_level(Some("verbose".to_string())));
        assert_eq!(tracing::Level::INFO, log_level(None));
    }
}
