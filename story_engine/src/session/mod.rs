//! Game Session - drives one playthrough of a story graph.
//!
//! The traversal loop works as follows:
//! 1. **Fetch**: Look up the current node
//! 2. **Present**: Show its text and, unless it is an ending, its options
//! 3. **Choose**: Ask the player for an option number
//! 4. **Apply**: Add the option's health delta, clamped at zero
//! 5. **Check**: Stop if health ran out, otherwise move to the option's target

mod player_io;

#[cfg(test)]
pub(crate) mod scripted;

pub use player_io::*;

use serde::Serialize;
use story_rules::{GameConfig, Outcome, PlayerState, SessionId};

use crate::error::SessionError;
use crate::story_graph::{NodeId, StoryGraph};

/// Shown when a choice drains the last of the player's health.
pub const HEALTH_DEPLETED_MESSAGE: &str = "Your health dropped to 0!";

/// The terminal state a playthrough reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// The story arrived at a node with no options.
    EndingReached { node: NodeId, outcome: Outcome },
    /// Health hit zero on the way to `node`, which was never shown.
    HealthDepleted { node: NodeId },
}

/// Summary of a finished playthrough.
#[derive(Debug, Clone, Serialize)]
pub struct Playthrough {
    pub session: SessionId,
    pub termination: Termination,
    pub final_health: i32,
    /// Nodes shown to the player, from the start node onward. Ends with the
    /// ending node, or on depletion with the last node shown; the fatal
    /// target is only in [`Termination::HealthDepleted`].
    pub path: Vec<NodeId>,
}

impl Playthrough {
    /// Outcome the player was shown.
    pub fn outcome(&self) -> Outcome {
        match &self.termination {
            Termination::EndingReached { outcome, .. } => *outcome,
            Termination::HealthDepleted { .. } => Outcome::Lose,
        }
    }

    /// Number of choices the player made.
    pub fn choices_made(&self) -> usize {
        match self.termination {
            Termination::EndingReached { .. } => self.path.len().saturating_sub(1),
            Termination::HealthDepleted { .. } => self.path.len(),
        }
    }
}

/// One playthrough over a shared, read-only story graph.
///
/// The session is the only owner of the player's state; the graph is borrowed
/// so several sessions can play the same content.
pub struct GameSession<'g> {
    id: SessionId,
    graph: &'g StoryGraph,
    player: PlayerState,
}

impl<'g> GameSession<'g> {
    /// Create a session with the given starting health.
    pub fn new(graph: &'g StoryGraph, initial_health: i32) -> Self {
        Self {
            id: SessionId::new(),
            graph,
            player: PlayerState::new(initial_health),
        }
    }

    /// Create a session using the configured starting health.
    pub fn from_config(graph: &'g StoryGraph, config: &GameConfig) -> Self {
        Self::new(graph, config.initial_health)
    }

    /// Identifier used to tag this session's log records.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current health of the player.
    pub fn health(&self) -> i32 {
        self.player.health()
    }

    /// Play from `start` until an ending is reached or health runs out.
    ///
    /// The loop keeps no history beyond the visited path, so cyclic graphs are
    /// fine: only an ending or zero health stops it.
    pub fn run<I>(mut self, start: &str, io: &mut I) -> Result<Playthrough, SessionError>
    where
        I: PlayerIo + ?Sized,
    {
        let span = tracing::info_span!("session", id = %self.id);
        let _enter = span.enter();

        let graph = self.graph;
        let mut current = NodeId::from(start);
        let mut path = vec![current.clone()];

        tracing::info!(start = %current, health = self.player.health(), "session started");

        loop {
            let node = graph.get(current.as_str())?;
            tracing::debug!(node = %current, health = self.player.health(), "entered node");

            io.show_text(node.text())?;

            if node.is_ending() {
                let health = self.player.health();
                let outcome = node.outcome();
                io.show_final_state(health, outcome)?;

                tracing::info!(node = %current, health, %outcome, "ending reached");
                return Ok(Playthrough {
                    session: self.id,
                    termination: Termination::EndingReached {
                        node: current,
                        outcome,
                    },
                    final_health: health,
                    path,
                });
            }

            io.show_options(&node.labels())?;

            let max = node.options().len();
            let choice = io.request_choice(max)?;
            let option = choice
                .checked_sub(1)
                .and_then(|index| node.options().get(index))
                .ok_or(SessionError::InvalidChoice { choice, max })?;

            let health = self.player.apply_delta(option.health_delta);
            tracing::debug!(
                choice,
                target = %option.target,
                delta = option.health_delta,
                health,
                "applied choice"
            );

            if self.player.is_depleted() {
                io.show_text(HEALTH_DEPLETED_MESSAGE)?;
                io.show_final_state(health, Outcome::Lose)?;

                tracing::info!(node = %option.target, "health depleted");
                return Ok(Playthrough {
                    session: self.id,
                    termination: Termination::HealthDepleted {
                        node: option.target.clone(),
                    },
                    final_health: health,
                    path,
                });
            }

            current = option.target.clone();
            path.push(current.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedIo;
    use super::*;
    use crate::error::StoryError;
    use crate::story_graph::{content, StoryNode};
    use story_rules::ContentTuning;

    fn play(graph: &StoryGraph, choices: &[usize]) -> (Playthrough, ScriptedIo) {
        let mut io = ScriptedIo::new(choices);
        let playthrough = GameSession::new(graph, 100).run("start", &mut io).unwrap();
        (playthrough, io)
    }

    fn ids(path: &[NodeId]) -> Vec<&str> {
        path.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_ignore_berries_wins_at_full_health() {
        let graph = StoryGraph::build().unwrap();
        let (playthrough, io) = play(&graph, &[1, 2, 1]);

        assert_eq!(playthrough.final_health, 100);
        assert_eq!(playthrough.outcome(), Outcome::Win);
        assert_eq!(
            ids(&playthrough.path),
            vec!["start", "look_around", "ignore_berries", "good_ending"]
        );
        assert_eq!(playthrough.choices_made(), 3);
        assert_eq!(io.finals, vec![(100, Outcome::Win)]);
    }

    #[test]
    fn test_eating_berries_is_a_losing_ending() {
        let graph = StoryGraph::build().unwrap();
        let (playthrough, io) = play(&graph, &[1, 1]);

        assert_eq!(playthrough.final_health, 80);
        assert_eq!(playthrough.outcome(), Outcome::Lose);
        assert_eq!(
            playthrough.termination,
            Termination::EndingReached {
                node: NodeId::from("eat_berries"),
                outcome: Outcome::Lose,
            }
        );
        assert_eq!(io.finals, vec![(80, Outcome::Lose)]);
    }

    #[test]
    fn test_fighting_the_wolf_costs_health() {
        let graph = StoryGraph::build().unwrap();
        let (playthrough, _) = play(&graph, &[2, 1, 1]);

        assert_eq!(playthrough.final_health, 70);
        assert_eq!(playthrough.outcome(), Outcome::Win);
        assert_eq!(
            ids(&playthrough.path),
            vec!["start", "call_help", "fight_wolf", "good_ending"]
        );
    }

    #[test]
    fn test_deadly_wolf_depletes_health_before_ending() {
        let tuning = ContentTuning {
            wolf_fight_delta: -100,
            ..Default::default()
        };
        let graph = content::forest_story(&tuning).unwrap();
        let (playthrough, io) = play(&graph, &[2, 1]);

        assert_eq!(playthrough.final_health, 0);
        assert_eq!(playthrough.outcome(), Outcome::Lose);
        assert_eq!(
            playthrough.termination,
            Termination::HealthDepleted {
                node: NodeId::from("fight_wolf"),
            }
        );
        assert_eq!(ids(&playthrough.path), vec!["start", "call_help"]);
        assert!(io.texts.iter().any(|t| t == HEALTH_DEPLETED_MESSAGE));
        assert!(!io.texts.iter().any(|t| t == "You fight bravely but get injured."));
        assert_eq!(io.finals, vec![(0, Outcome::Lose)]);
    }

    #[test]
    fn test_depleted_path_stops_at_last_shown_node() {
        let tuning = ContentTuning {
            berry_poison_delta: -100,
            ..Default::default()
        };
        let graph = content::forest_story(&tuning).unwrap();
        let (playthrough, io) = play(&graph, &[1, 1]);

        assert_eq!(ids(&playthrough.path), vec!["start", "look_around"]);
        assert_eq!(
            playthrough.termination,
            Termination::HealthDepleted {
                node: NodeId::from("eat_berries"),
            }
        );
        assert_eq!(playthrough.choices_made(), 2);
        assert!(!io.texts.iter().any(|t| t == "The berries were poisonous!"));
    }

    #[test]
    fn test_overkill_clamps_at_zero() {
        let tuning = ContentTuning {
            wolf_fight_delta: -250,
            ..Default::default()
        };
        let graph = content::forest_story(&tuning).unwrap();
        let (playthrough, _) = play(&graph, &[2, 1]);

        assert_eq!(playthrough.final_health, 0);
    }

    #[test]
    fn test_options_shown_for_each_choice() {
        let graph = StoryGraph::build().unwrap();
        let (_, io) = play(&graph, &[2, 2, 1]);

        assert_eq!(io.options[0], vec!["Look around", "Call for help"]);
        assert_eq!(io.options[1], vec!["Fight the wolf", "Run away"]);
        assert_eq!(io.options[2], vec!["Continue"]);
        assert_eq!(io.requested, vec![2, 2, 1]);
    }

    #[test]
    fn test_cycle_terminates_by_health() {
        let graph = StoryGraph::builder()
            .node(
                "start",
                StoryNode::builder()
                    .text("The path loops back.")
                    .option("bramble", "Push through", -30)
                    .build()
                    .unwrap(),
            )
            .node(
                "bramble",
                StoryNode::builder()
                    .text("Thorns scratch you.")
                    .option("start", "Keep going", -30)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let (playthrough, _) = play(&graph, &[1; 10]);

        assert_eq!(playthrough.final_health, 0);
        assert!(matches!(playthrough.termination, Termination::HealthDepleted { .. }));
        assert_eq!(playthrough.choices_made(), 4);
    }

    #[test]
    fn test_health_never_increases_on_bundled_content() {
        let graph = StoryGraph::build().unwrap();

        for script in [[1, 1, 1], [1, 2, 1], [2, 1, 1], [2, 2, 1]] {
            let mut io = ScriptedIo::new(&script);
            let playthrough = GameSession::new(&graph, 100).run("start", &mut io).unwrap();
            assert!(playthrough.final_health <= 100);
            assert!(playthrough.final_health >= 0);
        }
    }

    #[test]
    fn test_sessions_share_a_graph() {
        let graph = StoryGraph::build().unwrap();
        let first = GameSession::new(&graph, 100);
        let second = GameSession::new(&graph, 40);
        assert_ne!(first.id(), second.id());

        let mut io = ScriptedIo::new(&[2, 1, 1]);
        let hurt = second.run("start", &mut io).unwrap();
        let mut io = ScriptedIo::new(&[1, 2, 1]);
        let unhurt = first.run("start", &mut io).unwrap();

        assert_eq!(hurt.final_health, 10);
        assert_eq!(unhurt.final_health, 100);
    }

    #[test]
    fn test_unknown_start_node() {
        let graph = StoryGraph::build().unwrap();
        let mut io = ScriptedIo::new(&[]);
        let err = GameSession::new(&graph, 100).run("attic", &mut io).unwrap_err();

        assert!(matches!(err, SessionError::Story(StoryError::UnknownNode(_))));
    }

    #[test]
    fn test_out_of_contract_choice_is_an_error() {
        let graph = StoryGraph::build().unwrap();
        let mut io = ScriptedIo::new(&[5]);
        let err = GameSession::new(&graph, 100).run("start", &mut io).unwrap_err();

        assert!(matches!(err, SessionError::InvalidChoice { choice: 5, max: 2 }));
    }

    #[test]
    fn test_exhausted_input_is_an_error() {
        let graph = StoryGraph::build().unwrap();
        let mut io = ScriptedIo::new(&[1]);
        let err = GameSession::new(&graph, 100).run("start", &mut io).unwrap_err();

        assert!(matches!(err, SessionError::Io(_)));
    }

    #[test]
    fn test_console_playthrough() {
        let graph = StoryGraph::build().unwrap();
        let input = std::io::Cursor::new(b"x\n2\n1\n1\n".to_vec());
        let mut io = ConsoleIo::new(input, Vec::new());

        let playthrough = GameSession::new(&graph, 100).run("start", &mut io).unwrap();
        assert_eq!(playthrough.final_health, 70);

        let output = String::from_utf8(io.into_output()).unwrap();
        assert!(output.starts_with("\nYou wake up in a dark forest.\n1) Look around\n"));
        assert!(output.contains("Invalid input! Please enter a number between 1 and 2."));
        assert!(output.ends_with("You escaped safely!\nFinal Health: 70\nYOU WIN\n"));
    }

    #[test]
    fn test_from_config_uses_initial_health() {
        let graph = StoryGraph::build().unwrap();
        let config = GameConfig {
            initial_health: 25,
            ..Default::default()
        };

        let session = GameSession::from_config(&graph, &config);
        assert_eq!(session.health(), 25);

        let mut io = ScriptedIo::new(&[2, 1]);
        let playthrough = session.run(&config.start_node, &mut io).unwrap();
        assert!(matches!(playthrough.termination, Termination::HealthDepleted { .. }));
    }
}
