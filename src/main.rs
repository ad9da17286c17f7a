use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::info;
use serde_json::json;

use egram::agent::{Agent, SimulatedAgent};
use egram::cli::Cli;
use egram::config::Config;
use egram::shell::{
    Activator, AuthenticationComponent, PopupContext, PopupCoordinator, Shell, WorkspaceComponent,
};
use egram::ui;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("egram.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting egram");

    let config = Config::load(cli.config.as_deref())?;
    info!("config loaded (test dc: {})", config.use_test_dc);

    let agent = Arc::new(SimulatedAgent::with_config(&config));
    let popups = PopupCoordinator::new();

    let shell = Shell::new(
        agent.clone() as Arc<dyn Agent>,
        &popups,
        Activator::new(AuthenticationComponent::new),
        Activator::new(WorkspaceComponent::new),
    );

    // Scripted backend so the shell is observable without a real server.
    let interval = Duration::from_secs(cli.demo_interval);
    let backend_driver = agent.clone().run_demo_flow(interval);

    // Popup requests originate on a worker task; the shell loop marshals
    // them onto the presentation task.
    let popup_driver = {
        let popups = popups.clone();
        tokio::spawn(async move {
            tokio::time::sleep(interval * 6).await;
            popups.show(PopupContext::new(
                "Connected",
                json!({ "note": "session established" }),
            ));
            tokio::time::sleep(interval * 2).await;
            popups.hide();
        })
    };

    let result = ui::launch(shell).await;

    backend_driver.abort();
    popup_driver.abort();
    result
}
