use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// ログ出力を初期化（RUST_LOG があれば優先）
///
/// 結果表示は標準出力に出すので、ログは標準エラーへ書く。
pub fn init_logging(verbose: bool) -> Result<()> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(verbose, "logger initialized");
    Ok(())
}
