use amethyst::{
    core::SystemDesc,
    derive::SystemDesc,
    ecs::prelude::{Read, System, SystemData, World, WriteStorage},
    ui::UiText,
};

use crate::pong::{GameState, Hud, ScoreBoard};

#[derive(SystemDesc)]
pub struct HudSystem;

impl<'s> System<'s> for HudSystem {
    type SystemData = (
        WriteStorage<'s, UiText>,
        Option<Read<'s, Hud>>,
        Read<'s, ScoreBoard>,
        Read<'s, GameState>,
    );

    fn run(&mut self, (mut ui_texts, hud, score_board, state): Self::SystemData) {
        let hud = match hud {
            Some(hud) => hud,
            None => return,
        };
        if let Some(text) = ui_texts.get_mut(hud.score) {
            text.text = score_board.to_string();
        }
        if let Some(text) = ui_texts.get_mut(hud.overlay) {
            text.text = overlay_message(*state, &score_board);
        }
    }
}

pub fn overlay_message(state: GameState, score_board: &ScoreBoard) -> String {
    match state {
        GameState::Playing => String::new(),
        GameState::NotStarted => "Press Space to Start".to_owned(),
        GameState::GameOver => {
            let winner = score_board.winner().map_or(2, |side| side.player_number());
            format!("Player {} Wins! Press Space to Restart", winner)
        }
    }
}
