use anyhow::Result;
use oneshot_chat::ui::terminal::TerminalUI;
use oneshot_chat::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!(
        "providers: deepseek={} coze={}",
        config.deepseek.is_some(),
        config.coze.is_some()
    );

    let mut ui = TerminalUI::new(&config)?;
    ui.run().await?;

    Ok(())
}
