use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sensitive-detect")]
#[command(about = "敏感内容检测サービスのクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのベースURL（環境変数・設定ファイルより優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// 削除確認を省略
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキストを検出
    DetectText {
        /// 検出するテキスト（省略時は --file）
        text: Option<String>,

        /// テキストファイルから読み込む
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 严格模式（規則マッチをスキップして大模型で検出）
        #[arg(long)]
        strict: bool,
    },

    /// 文書ファイルを検出（TXT/PDF/DOCX/DOC/画像）
    DetectDocument {
        /// 文書ファイルのパス
        #[arg(required = true)]
        path: PathBuf,
    },

    /// 词库管理
    Libraries {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// 検出に使う词库
    Active {
        #[command(subcommand)]
        action: ActiveAction,
    },

    /// サービスの稼働確認
    Health,

    /// 大模型の予熱状態
    ModelStatus,

    /// 大模型を予熱
    WarmUp,

    /// 設定を表示/編集
    Config {
        /// ベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum LibraryAction {
    /// 词库一覧
    List,

    /// 词库の内容を表示
    Show {
        name: String,
    },

    /// 词库を作成
    Create {
        name: String,

        #[command(flatten)]
        words: WordsArgs,
    },

    /// 词库の敏感词を置き換える
    Update {
        name: String,

        #[command(flatten)]
        words: WordsArgs,
    },

    /// 词库を削除
    Delete {
        name: String,
    },
}

/// 敏感词の指定（1行1語のファイル、または --word の繰り返し）
#[derive(clap::Args, Debug, Clone, Default)]
pub struct WordsArgs {
    /// 敏感词（複数指定可）
    #[arg(short, long = "word")]
    pub words: Vec<String>,

    /// 1行1語の敏感词ファイル
    #[arg(short = 'f', long)]
    pub words_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ActiveAction {
    /// サーバ側で有効な词库を表示
    Status,

    /// 指定した词库で検出するよう更新（指定なしで默认词库）
    Apply {
        names: Vec<String>,
    },

    /// 現在の選択に追加して更新
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// 現在の選択から外して更新
    Remove {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detect_text() {
        let cli = Cli::try_parse_from(["sensitive-detect", "detect-text", "你好", "--strict"]).unwrap();
        match cli.command {
            Commands::DetectText { text, strict, file } => {
                assert_eq!(text.as_deref(), Some("你好"));
                assert!(strict);
                assert!(file.is_none());
            }
            _ => panic!("detect-text として解析されていない"),
        }
    }

    #[test]
    fn test_parse_library_create_words() {
        let cli = Cli::try_parse_from([
            "sensitive-detect", "libraries", "create", "广告", "-w", "a", "-w", "b", "--yes",
        ])
        .unwrap();
        assert!(cli.yes);
        match cli.command {
            Commands::Libraries { action: LibraryAction::Create { name, words } } => {
                assert_eq!(name, "广告");
                assert_eq!(words.words, vec!["a", "b"]);
            }
            _ => panic!("libraries create として解析されていない"),
        }
    }

    #[test]
    fn test_parse_active_apply_empty() {
        let cli = Cli::try_parse_from(["sensitive-detect", "active", "apply"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Active { action: ActiveAction::Apply { ref names } } if names.is_empty()
        ));
    }

    #[test]
    fn test_global_base_url() {
        let cli = Cli::try_parse_from(["sensitive-detect", "health", "--base-url", "http://h:1"]).unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://h:1"));
    }
}
