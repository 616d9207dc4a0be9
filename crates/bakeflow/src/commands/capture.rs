use bakeflow_core::OutputSink;
use bakeflow_pipeline::{CaptureConfig, capture};
use colored::Colorize;

pub async fn handle(sink: &OutputSink) -> anyhow::Result<()> {
    let config = CaptureConfig::from_env()?;

    println!("{}", "📸 マシンイメージを作成します...".blue().bold());
    let output = capture::run(&config).await?;

    if let (Some(id), Some(name)) = (output.get("image_id"), output.get("image_name")) {
        println!("{}", format!("✓ イメージ作成完了: {} ({})", id, name).green());
    }

    sink.append(&output)?;
    Ok(())
}
