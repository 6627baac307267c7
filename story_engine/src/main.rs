//! Forest Story - console entry point.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use story_engine::{content, ConsoleIo, GameSession, StoryGraph};
use story_rules::GameConfig;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the story text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forest_story=warn,story_engine=warn,story_rules=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = GameConfig::from_env().context("failed to load configuration")?;

    let graph = match &config.story_file {
        Some(path) => StoryGraph::load(path)
            .with_context(|| format!("failed to load story from {}", path.display()))?,
        None => content::forest_story(&config.tuning).context("bundled story is malformed")?,
    };
    graph
        .validate_start(&config.start_node)
        .context("configured start node is missing")?;

    let mut io = ConsoleIo::stdio();
    let playthrough = GameSession::from_config(&graph, &config).run(&config.start_node, &mut io)?;

    tracing::info!(
        session = %playthrough.session,
        outcome = %playthrough.outcome(),
        health = playthrough.final_health,
        choices = playthrough.choices_made(),
        "playthrough finished"
    );
    Ok(())
}
