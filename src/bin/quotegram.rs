use std::sync::Arc;

use anyhow::Context as _;
use quotegram::bot::{Bot, RunMode};
use quotegram::config::{self, Command, Settings};
use quotegram::schedule::{Scheduler, ctrl_c};

fn main() -> anyhow::Result<()> {
    let (cli, settings) = config::load_with_cli()?;
    quotegram::telemetry::init(&settings.logging)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    match cli.command() {
        Command::Run(args) => runtime.block_on(cmd_run(&settings, args.test)),
        Command::Once(args) => runtime.block_on(cmd_once(&settings, args.test)),
    }
}

async fn cmd_run(settings: &Settings, test: bool) -> anyhow::Result<()> {
    let bot = Arc::new(Bot::from_settings(settings, RunMode::from_test_flag(test))?);
    let scheduler = Scheduler::new(settings.schedule.for_mode(test))?;
    tracing::info!(
        mode = ?bot.mode(),
        cron = scheduler.expression(),
        assets = %settings.assets.path.display(),
        "quotegram starting"
    );

    scheduler
        .run(move || Arc::clone(&bot).tick(), ctrl_c())
        .await
        .context("scheduler stopped with an error")?;
    Ok(())
}

async fn cmd_once(settings: &Settings, test: bool) -> anyhow::Result<()> {
    let bot = Bot::from_settings(settings, RunMode::from_test_flag(test))?;
    let outcome = bot.run_tick().await.context("tick failed")?;
    eprintln!("wrote {}", outcome.path.display());
    Ok(())
}
