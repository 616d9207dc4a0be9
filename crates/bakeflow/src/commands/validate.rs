use bakeflow_core::OutputSink;
use bakeflow_pipeline::{ValidateConfig, validate};
use colored::Colorize;

pub async fn handle(sink: &OutputSink) -> anyhow::Result<()> {
    let config = ValidateConfig::from_env()?;

    println!("{}", "🧪 テストインスタンスを起動します...".blue().bold());
    let output = validate::run(&config).await?;

    if let (Some(id), Some(ip)) = (
        output.get("test_instance_id"),
        output.get("test_instance_ip"),
    ) {
        println!(
            "{}",
            format!("✓ テストインスタンス ACTIVE: {} (IP: {})", id, ip).green()
        );
    }

    sink.append(&output)?;
    Ok(())
}
