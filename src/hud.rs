//! On-screen text. Layout is computed separately from drawing so the screen
//! contents can be checked without a canvas.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::party::{HighScoreStore, PartyGame, Phase};
use crate::vec2::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn as_css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudLine {
    pub text: String,
    pub at: Vec2,
    pub align: Align,
}

impl HudLine {
    fn new(text: String, x: f64, y: f64, align: Align) -> Self {
        Self { text, at: Vec2::new(x, y), align }
    }
}

/// Where player `idx`'s score sits: one player per screen quadrant, clockwise
/// from top left is 0, 1, then 2 bottom left, 3 bottom right.
pub fn player_anchor(idx: usize, width: f64, height: f64) -> (Vec2, Align) {
    let (qw, qh) = (width / 2.0, height / 2.0);
    let x_left = qw * 0.1;
    let x_right = width - qw * 0.1;
    let y_top = qh * 0.3;
    let y_bottom = height - qh * 0.3;
    match idx % 4 {
        0 => (Vec2::new(x_left, y_top), Align::Left),
        1 => (Vec2::new(x_right, y_top), Align::Right),
        2 => (Vec2::new(x_left, y_bottom), Align::Left),
        _ => (Vec2::new(x_right, y_bottom), Align::Right),
    }
}

pub fn layout<S: HighScoreStore>(game: &PartyGame<S>, width: f64, height: f64) -> Vec<HudLine> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let qh = height / 2.0;
    let start_prompt = format!("Tap {} to Start", game.config().start_button.key_label());
    let high_score = || {
        HudLine::new(format!("High Score: {}", game.high_score()), cx, height - qh * 0.1, Align::Center)
    };

    match game.phase() {
        Phase::Title => vec![HudLine::new(start_prompt, cx, cy, Align::Center), high_score()],
        Phase::GameOver { winner } => {
            let p = &game.players()[winner];
            vec![
                HudLine::new("Game Over!".to_owned(), cx, cy - qh * 0.2, Align::Center),
                HudLine::new(format!("{} won with {} taps!", p.name, p.taps), cx, cy, Align::Center),
                HudLine::new(start_prompt, cx, cy + qh * 0.2, Align::Center),
            ]
        }
        Phase::Playing => {
            let mut lines = vec![HudLine::new(
                format!("Time Left: {}", game.time_left()),
                cx,
                qh * 0.2,
                Align::Center,
            )];
            for (idx, p) in game.players().iter().enumerate() {
                let (at, align) = player_anchor(idx, width, height);
                lines.push(HudLine::new(format!("{}: {}", p.name, p.taps), at.x, at.y, align));
            }
            lines.push(high_score());
            lines
        }
    }
}

pub fn font_for_width(width: f64) -> String {
    format!("{}px GameFont, \"Noto Emoji\", monospace", width * 0.06)
}

/// Clear to black and draw `lines` in white.
pub fn draw(ctx: &CanvasRenderingContext2d, lines: &[HudLine], width: f64, height: f64) {
    ctx.set_fill_style(&JsValue::from_str("black"));
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.set_fill_style(&JsValue::from_str("white"));
    ctx.set_font(&font_for_width(width));
    for line in lines {
        ctx.set_text_align(line.align.as_css());
        ctx.fill_text(&line.text, line.at.x, line.at.y).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{Button, ButtonSnapshot};
    use crate::party::{HighScoreStore, MemoryStore};

    fn texts(lines: &[HudLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn title_screen_shows_prompt_and_record() {
        let mut store = MemoryStore::new();
        store.save("highScore", 77).unwrap();
        let game = PartyGame::new(GameConfig::default(), store).unwrap();
        let lines = layout(&game, 800.0, 600.0);
        assert_eq!(texts(&lines), ["Tap Z to Start", "High Score: 77"]);
        assert_eq!(lines[0].at, Vec2::new(400.0, 300.0));
        assert_eq!(lines[1].at, Vec2::new(400.0, 570.0));
    }

    #[test]
    fn playing_screen_puts_players_in_quadrants() {
        let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
        game.update(&ButtonSnapshot::default().with(Button::South), 16.0);
        let lines = layout(&game, 800.0, 600.0);
        assert_eq!(
            texts(&lines),
            ["Time Left: 10", "😀: 0", "😂: 0", "😎: 0", "😍: 0", "High Score: 0"]
        );
        assert_eq!(lines[1].align, Align::Left);
        assert_eq!(lines[2].align, Align::Right);
        assert_eq!(lines[2].at, Vec2::new(760.0, 90.0));
        assert_eq!(lines[3].at, Vec2::new(40.0, 510.0));
    }

    #[test]
    fn font_scales_with_canvas() {
        assert_eq!(font_for_width(500.0), "30px GameFont, \"Noto Emoji\", monospace");
    }
}
