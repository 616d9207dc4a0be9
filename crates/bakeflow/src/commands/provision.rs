use bakeflow_core::OutputSink;
use bakeflow_pipeline::{ProvisionConfig, provision};
use colored::Colorize;

pub async fn handle(sink: &OutputSink) -> anyhow::Result<()> {
    let config = ProvisionConfig::from_env()?;

    println!("{}", "🚀 ビルドインスタンスを作成します...".blue().bold());
    let output = provision::run(&config).await?;

    if let (Some(id), Some(ip)) = (output.get("instance_id"), output.get("instance_ip")) {
        println!(
            "{}",
            format!("✓ インスタンス ACTIVE: {} (IP: {})", id, ip).green()
        );
    }

    sink.append(&output)?;
    Ok(())
}
