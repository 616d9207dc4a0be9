mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bake")]
#[command(about = "NHN Cloud マシンイメージのベイクパイプライン", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ビルド用インスタンスを作成して ACTIVE まで待機
    Provision,
    /// インスタンスからマシンイメージを作成して active まで待機
    Capture,
    /// イメージを別リージョンへ複製
    Replicate,
    /// 作成したイメージからテストインスタンスを起動
    Validate,
    /// バージョン表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // key=value 出力は stdout に流れるため、ログは stderr へ
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    if matches!(cli.command, Commands::Version) {
        println!("bakeflow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let sink = bakeflow_core::OutputSink::from_env();

    match cli.command {
        Commands::Provision => commands::provision::handle(&sink).await?,
        Commands::Capture => commands::capture::handle(&sink).await?,
        Commands::Replicate => commands::replicate::handle(&sink).await?,
        Commands::Validate => commands::validate::handle(&sink).await?,
        Commands::Version => unreachable!("Version is handled above"),
    }

    Ok(())
}
