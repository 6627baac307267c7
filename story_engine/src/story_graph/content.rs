//! The bundled forest story.

use story_rules::{ContentTuning, Outcome};

use super::{StoryGraph, StoryNode};
use crate::error::StoryError;

/// Node every playthrough starts from.
pub const START: &str = "start";

/// Assemble and validate the forest story.
pub fn forest_story(tuning: &ContentTuning) -> Result<StoryGraph, StoryError> {
    StoryGraph::builder()
        .node(
            START,
            StoryNode::builder()
                .text("You wake up in a dark forest.")
                .option("look_around", "Look around", 0)
                .option("call_help", "Call for help", 0)
                .build()?,
        )
        .node(
            "look_around",
            StoryNode::builder()
                .text("You see berries. Some look poisonous.")
                .option("eat_berries", "Eat the berries", tuning.berry_poison_delta)
                .option("ignore_berries", "Ignore them", 0)
                .build()?,
        )
        .node(
            "call_help",
            StoryNode::builder()
                .text("A wolf appears!")
                .option("fight_wolf", "Fight the wolf", tuning.wolf_fight_delta)
                .option("run_away", "Run away", 0)
                .build()?,
        )
        .node(
            "ignore_berries",
            StoryNode::builder()
                .text("You walk past the berries and find a safe path.")
                .option("good_ending", "Continue", 0)
                .build()?,
        )
        .node(
            "fight_wolf",
            StoryNode::builder()
                .text("You fight bravely but get injured.")
                .option("good_ending", "Continue", 0)
                .build()?,
        )
        .node(
            "run_away",
            StoryNode::builder()
                .text("You escape the wolf unharmed.")
                .option("good_ending", "Continue", 0)
                .build()?,
        )
        .node(
            "eat_berries",
            StoryNode::ending("The berries were poisonous!", Outcome::Lose)?,
        )
        .node(
            "good_ending",
            StoryNode::ending("You escaped safely!", Outcome::Win)?,
        )
        .build()
}
