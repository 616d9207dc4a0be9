use bakeflow_core::OutputSink;
use bakeflow_pipeline::{ReplicateConfig, replicate};
use colored::Colorize;

pub async fn handle(sink: &OutputSink) -> anyhow::Result<()> {
    let config = ReplicateConfig::from_env()?;

    println!(
        "{}",
        format!(
            "📦 イメージを {} リージョンへ複製します...",
            config.target_region
        )
        .blue()
        .bold()
    );
    let output = replicate::run(&config).await?;

    if let (Some(id), Some(region)) = (output.get("target_image_id"), output.get("target_region"))
    {
        println!("{}", format!("✓ 複製完了: {} ({})", id, region).green());
    }

    sink.append(&output)?;
    Ok(())
}
