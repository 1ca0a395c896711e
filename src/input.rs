//! Keyboard handling: raw key presses are queued in arrival order and folded
//! once per frame into a [`FrameInput`].

use std::collections::VecDeque;

use macroquad::input::utils::{register_input_subscriber, repeat_all_miniquad_input};
use macroquad::input::{KeyCode, is_quit_requested, prevent_quit};
use macroquad::miniquad::{EventHandler, KeyMods};

use crate::grid::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    /// The window was asked to close.
    QuitRequested,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Steer(Direction),
    Start,
    Restart,
    Quit,
}

pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Action::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::S => Some(Action::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::A => Some(Action::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::D => Some(Action::Steer(Direction::Right)),
        KeyCode::Space => Some(Action::Start),
        KeyCode::R => Some(Action::Restart),
        KeyCode::Escape | KeyCode::Q => Some(Action::Quit),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Last steering key of the frame.
    pub direction: Option<Direction>,
    pub start: bool,
    pub restart: bool,
    pub quit: bool,
}

impl FrameInput {
    fn apply(&mut self, event: InputEvent) {
        let action = match event {
            InputEvent::QuitRequested => Some(Action::Quit),
            InputEvent::KeyPressed(key) => action_for(key),
        };
        match action {
            Some(Action::Steer(direction)) => self.direction = Some(direction),
            Some(Action::Start) => self.start = true,
            Some(Action::Restart) => self.restart = true,
            Some(Action::Quit) => self.quit = true,
            None => {}
        }
    }
}

#[derive(Debug, Default)]
pub struct InputCollector {
    queue: VecDeque<InputEvent>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Drains everything queued since the previous call.
    pub fn poll(&mut self) -> FrameInput {
        let mut input = FrameInput::default();
        for event in self.queue.drain(..) {
            input.apply(event);
        }
        input
    }
}

impl EventHandler for InputCollector {
    fn update(&mut self) {}

    fn draw(&mut self) {}

    fn key_down_event(&mut self, keycode: KeyCode, _keymods: KeyMods, repeat: bool) {
        if !repeat {
            self.push(InputEvent::KeyPressed(keycode));
        }
    }
}

/// Feeds window key presses and close requests into an [`InputCollector`].
pub struct Keyboard {
    subscriber: usize,
}

impl Keyboard {
    /// Needs a running macroquad context.
    pub fn attach() -> Self {
        prevent_quit();
        Self {
            subscriber: register_input_subscriber(),
        }
    }

    pub fn collect(&self, collector: &mut InputCollector) {
        repeat_all_miniquad_input(collector, self.subscriber);
        if is_quit_requested() {
            collector.push(InputEvent::QuitRequested);
        }
    }
}
