use anyhow::Context;
use chrono::{DateTime, Local};
use clap::Parser;
use sensitive_detect::{cli, commands, config, logging};
use cli::{ActiveAction, Cli, Commands, LibraryAction};
use config::Config;
use std::path::Path;

/// UNIX 秒をローカル時刻で表示
fn format_timestamp(seconds: Option<f64>) -> String {
    seconds
        .and_then(|s| DateTime::from_timestamp(s as i64, 0))
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn read_text(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("テキストファイルを読み込めません: {}", path.display())),
        (None, None) => anyhow::bail!("検出するテキストか --file を指定してください"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let config = Config::load().context("設定の読み込みに失敗")?;
    let controller = commands::build_controller(&config, cli.base_url.as_deref(), cli.yes)?;

    match cli.command {
        Commands::DetectText { text, file, strict } => {
            let text = read_text(text, file.as_deref())?;
            commands::detect_text(&controller, &text, strict).await?;
        }

        Commands::DetectDocument { path } => {
            commands::detect_document(&controller, &path).await?;
        }

        Commands::Libraries { action } => match action {
            LibraryAction::List => {
                println!("{}", commands::list_libraries(&controller).await?);
            }
            LibraryAction::Show { name } => {
                println!("{}", commands::show_library(&controller, &name).await?);
            }
            LibraryAction::Create { name, words } => {
                let words = commands::read_words(&words)?;
                commands::create_library(&controller, &name, &words).await?;
            }
            LibraryAction::Update { name, words } => {
                let words = commands::read_words(&words)?;
                commands::update_library(&controller, &name, &words).await?;
            }
            LibraryAction::Delete { name } => {
                if !commands::delete_library(&controller, &name).await? {
                    println!("削除を取り消しました");
                }
            }
        },

        Commands::Active { action } => {
            match action {
                ActiveAction::Status => {}
                ActiveAction::Apply { names } => {
                    commands::apply_active(&controller, &names).await?;
                }
                ActiveAction::Add { names } => {
                    commands::add_active(&controller, &names).await?;
                }
                ActiveAction::Remove { names } => {
                    commands::remove_active(&controller, &names).await?;
                }
            }
            println!("{}", commands::active_status(&controller).await?);
        }

        Commands::Health => {
            let api = controller.api();
            let health = api
                .health()
                .await
                .with_context(|| format!("{} に接続できません", api.base_url()))?;
            println!("状態: {}", health.status);
            if let Some(version) = &health.version {
                println!("バージョン: {}", version);
            }
            println!("時刻: {}", format_timestamp(health.timestamp));
        }

        Commands::ModelStatus => {
            let status = controller.api().model_status().await?;
            println!("大模型: {}", if status.is_warmed_up { "已预热" } else { "未预热" });
            println!("  状态: {}", status.warmup_status);
            println!("  预热时间: {}", format_timestamp(status.warm_up_time));
            println!("  最后调用: {}", format_timestamp(status.last_call_time));
            if let Some(elapsed) = status.time_since_warmup {
                println!("  距预热: {:.0}秒", elapsed);
            }
        }

        Commands::WarmUp => {
            let message = controller.api().warm_up_model().await?;
            println!("✔ {}", if message.is_empty() { "模型预热完成" } else { message.as_str() });
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ ベースURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  ベースURL: {}", config.base_url);
                println!("  使用中のURL: {}", config.resolve_base_url(cli.base_url.as_deref()));
                match config.timeout_seconds {
                    Some(seconds) => println!("  タイムアウト: {}秒", seconds),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  削除確認の省略: {}", if config.assume_yes { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}
