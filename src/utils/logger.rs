use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 未設定時使用的過濾規則
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "monastery_catalog=debug,info"
    } else {
        "monastery_catalog=info"
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // 日誌寫到 stderr，stdout 留給查詢結果
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 結構化 JSON 日誌，供腳本或日誌收集器使用
pub fn init_json_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(false)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_shows_info_logs() {
        assert_eq!(default_directive(false), "monastery_catalog=info");
        assert!(default_directive(true).starts_with("monastery_catalog=debug"));
        assert!(default_directive(false).parse::<EnvFilter>().is_ok());
        assert!(default_directive(true).parse::<EnvFilter>().is_ok());
    }
}
