//! Scripted player I/O for tests.

use std::collections::VecDeque;
use std::io;
use story_rules::Outcome;

use super::PlayerIo;

/// Replays fixed choices and records everything shown.
#[derive(Debug, Default)]
pub(crate) struct ScriptedIo {
    choices: VecDeque<usize>,
    pub texts: Vec<String>,
    pub options: Vec<Vec<String>>,
    pub requested: Vec<usize>,
    pub finals: Vec<(i32, Outcome)>,
}

impl ScriptedIo {
    pub fn new(choices: &[usize]) -> Self {
        Self {
            choices: choices.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl PlayerIo for ScriptedIo {
    fn show_text(&mut self, text: &str) -> io::Result<()> {
        self.texts.push(text.to_string());
        Ok(())
    }

    fn show_options(&mut self, labels: &[&str]) -> io::Result<()> {
        self.options
            .push(labels.iter().map(|label| label.to_string()).collect());
        Ok(())
    }

    fn request_choice(&mut self, max: usize) -> io::Result<usize> {
        self.requested.push(max);
        self.choices
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn show_final_state(&mut self, health: i32, outcome: Outcome) -> io::Result<()> {
        self.finals.push((health, outcome));
        Ok(())
    }
}
