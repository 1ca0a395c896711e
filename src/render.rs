//! Drawing. The [`Renderer`] decides what goes where; a [`Canvas`] puts it on
//! screen.

use macroquad::color::Color;
use macroquad::shapes::draw_rectangle;
use macroquad::text::{draw_text, measure_text};

use crate::config::{GameConfig, rgb};
use crate::game::{Mode, Snapshot};
use crate::grid::Cell;

const TITLE_SIZE: f32 = 64.0;
const TEXT_SIZE: f32 = 28.0;
const HUD_Y: f32 = 20.0;
const GAME_OVER_SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.4);

pub trait Canvas {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Draws `text` centred on `center`.
    fn draw_text(&mut self, text: &str, size: f32, color: Color, center: (f32, f32));
}

pub struct Renderer {
    cell_size: f32,
    width: f32,
    height: f32,
    background: Color,
    backdrop: Color,
    text: Color,
    head: Color,
    body: Color,
    food: Color,
    title: Color,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        let (width, height) = config.window_size();
        let palette = &config.palette;
        Self {
            cell_size: config.cell_size as f32,
            width: width as f32,
            height: height as f32,
            background: rgb(palette.background),
            backdrop: rgb(palette.backdrop),
            text: rgb(palette.text),
            head: rgb(palette.head),
            body: rgb(palette.body),
            food: rgb(palette.food),
            title: rgb(palette.title),
        }
    }

    /// Draws one frame. `offset` shifts the board and HUD, never the
    /// backdrop behind them.
    pub fn draw<C: Canvas>(&self, canvas: &mut C, snapshot: &Snapshot<'_>, offset: (f32, f32)) {
        canvas.fill_rect(0.0, 0.0, self.width, self.height, self.backdrop);

        if snapshot.mode == Mode::Start {
            self.draw_start(canvas);
            return;
        }

        let (ox, oy) = offset;
        canvas.fill_rect(ox, oy, self.width, self.height, self.background);

        if let Some(food) = snapshot.food {
            self.draw_cell(canvas, food, self.food, offset);
        }
        let len = snapshot.snake.len();
        for (i, cell) in snapshot.snake.cells().enumerate() {
            let color = if i + 1 == len { self.head } else { self.body };
            self.draw_cell(canvas, cell, color, offset);
        }

        let center_x = self.width * 0.5;
        canvas.draw_text(
            &format!("Score: {}", snapshot.score),
            TEXT_SIZE,
            self.text,
            (center_x + ox, HUD_Y + oy),
        );

        if snapshot.mode == Mode::GameOver {
            canvas.fill_rect(0.0, 0.0, self.width, self.height, GAME_OVER_SHADE);
            canvas.draw_text(
                "GAME OVER",
                TITLE_SIZE,
                self.food,
                (center_x, self.height * 0.5 - 20.0),
            );
            canvas.draw_text(
                "Press R to restart",
                TEXT_SIZE,
                self.text,
                (center_x, self.height * 0.5 + 30.0),
            );
        }
    }

    fn draw_start<C: Canvas>(&self, canvas: &mut C) {
        let center_x = self.width * 0.5;
        canvas.draw_text("SUPER SNAKE", TITLE_SIZE, self.title, (center_x, self.height / 3.0));
        canvas.draw_text(
            "Press SPACE to start",
            TEXT_SIZE,
            self.text,
            (center_x, self.height * 0.5),
        );
    }

    fn draw_cell<C: Canvas>(&self, canvas: &mut C, cell: Cell, color: Color, (ox, oy): (f32, f32)) {
        canvas.fill_rect(
            ox + cell.x as f32 * self.cell_size,
            oy + cell.y as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
            color,
        );
    }
}

/// Draws straight to the macroquad window.
pub struct Screen;

impl Canvas for Screen {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        draw_rectangle(x, y, w, h, color);
    }

    fn draw_text(&mut self, text: &str, size: f32, color: Color, (cx, cy): (f32, f32)) {
        let m = measure_text(text, None, size as u16, 1.0);
        draw_text(text, cx - m.width * 0.5, cy + m.offset_y * 0.5, size, color);
    }
}
