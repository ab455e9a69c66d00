use std::collections::HashMap;

use winit::dpi::PhysicalPosition;
use winit::event as ev;

pub use ev::ElementState;
pub use ev::MouseButton;
pub use winit::keyboard::KeyCode as Key;

/// The state of a button (keyboard key or mouse button)
/// and time in number of ticks since it last changed.
#[derive(Clone, Copy)]
pub struct AgedState {
    pub state: ElementState,
    pub age: u32,
}

impl AgedState {
    fn new(state: ElementState) -> Self {
        AgedState { state, age: 0 }
    }

    fn is_pressed(&self, age_limit: Option<u32>) -> bool {
        matches!(self.state, ElementState::Pressed) && age_limit.map_or(true, |al| self.age <= al)
    }
}

/// Tracks the state of the keyboard and mouse so it can be queried
/// once per tick instead of chasing individual window events.
#[derive(Clone)]
pub struct InputCache {
    keyboard: HashMap<Key, AgedState>,
    mouse_buttons: HashMap<MouseButton, AgedState>,
    cursor_pos: PhysicalPosition<f64>,
    cursor_delta: PhysicalPosition<f64>,
    scroll_delta: f32,
}

impl InputCache {
    pub fn new() -> Self {
        InputCache {
            // immediately allocate enough space to fit every key the user presses
            keyboard: HashMap::with_capacity(128),
            mouse_buttons: HashMap::with_capacity(8),
            cursor_pos: PhysicalPosition::new(0.0, 0.0),
            cursor_delta: PhysicalPosition::new(0.0, 0.0),
            scroll_delta: 0.0,
        }
    }

    /// Age every tracked button and reset the per-tick movement deltas.
    /// The game loop calls this at the end of every tick.
    pub fn tick(&mut self) {
        for state in self.keyboard.values_mut() {
            state.age += 1;
        }
        for state in self.mouse_buttons.values_mut() {
            state.age += 1;
        }
        self.cursor_delta = PhysicalPosition::new(0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    //
    // Getters
    //

    /// True if the requested key is currently pressed
    /// (for fewer ticks than age_limit if provided), false otherwise.
    /// An age limit of `Some(0)` means "pressed during this tick".
    pub fn is_key_pressed(&self, key: Key, age_limit: Option<u32>) -> bool {
        self.keyboard
            .get(&key)
            .is_some_and(|s| s.is_pressed(age_limit))
    }

    /// True if the requested mouse button is currently pressed
    /// (for fewer ticks than age_limit if provided), false otherwise.
    pub fn is_mouse_button_pressed(&self, button: MouseButton, age_limit: Option<u32>) -> bool {
        self.mouse_buttons
            .get(&button)
            .is_some_and(|s| s.is_pressed(age_limit))
    }

    /// Get the cursor position in physical pixels down and right from the top left.
    pub fn cursor_position(&self) -> PhysicalPosition<f64> {
        self.cursor_pos
    }

    /// Get the distance the cursor moved during the last tick.
    pub fn cursor_delta(&self) -> PhysicalPosition<f64> {
        self.cursor_delta
    }

    /// Get the vertical scroll distance in pixels during the last tick.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    //
    // Trackers
    //

    /// Perform whatever tracking is available for the given window event.
    pub fn track_window_event(&mut self, event: &ev::WindowEvent) {
        use ev::WindowEvent::*;
        match event {
            KeyboardInput { event, .. } => self.track_keyboard(event),
            MouseInput { button, state, .. } => {
                track_button(&mut self.mouse_buttons, *button, *state);
            }
            MouseWheel { delta, .. } => self.track_mouse_wheel(*delta),
            CursorMoved { position, .. } => self.track_cursor_movement(*position),
            _ => (),
        }
    }

    /// Track the effect of a keyboard event.
    pub fn track_keyboard(&mut self, evt: &ev::KeyEvent) {
        let winit::keyboard::PhysicalKey::Code(code) = evt.physical_key else {
            return;
        };
        track_button(&mut self.keyboard, code, evt.state);
    }

    /// Track the screen position of the mouse cursor,
    /// accumulating movement into the per-tick delta.
    pub fn track_cursor_movement(&mut self, position: PhysicalPosition<f64>) {
        self.cursor_delta = PhysicalPosition::new(
            self.cursor_delta.x + position.x - self.cursor_pos.x,
            self.cursor_delta.y + position.y - self.cursor_pos.y,
        );
        self.cursor_pos = position;
    }

    /// Track a mouse wheel movement.
    pub fn track_mouse_wheel(&mut self, delta: ev::MouseScrollDelta) {
        const PIXELS_PER_LINE: f32 = 10.0;

        use ev::MouseScrollDelta::*;
        match delta {
            LineDelta(_, y) => self.scroll_delta += PIXELS_PER_LINE * y,
            PixelDelta(PhysicalPosition { y, .. }) => self.scroll_delta += y as f32,
        }
    }
}

impl Default for InputCache {
    fn default() -> Self {
        Self::new()
    }
}

// only reset the age when the state actually flips,
// so that OS key repeat events don't look like fresh presses
fn track_button<B: std::hash::Hash + Eq>(
    map: &mut HashMap<B, AgedState>,
    button: B,
    new_state: ElementState,
) {
    map.entry(button)
        .and_modify(|aged| {
            if aged.state != new_state {
                *aged = AgedState::new(new_state);
            }
        })
        .or_insert(AgedState::new(new_state));
}

#[cfg(test)]
mod tests {
    use super::*;

    // winit's KeyEvent can't be constructed outside of winit itself,
    // so keyboard tests poke the key map the same way track_keyboard does
    fn press(cache: &mut InputCache, key: Key) {
        track_button(&mut cache.keyboard, key, ElementState::Pressed);
    }

    #[test]
    fn key_age_limit_detects_fresh_presses() {
        let mut cache = InputCache::new();
        press(&mut cache, Key::Space);
        assert!(cache.is_key_pressed(Key::Space, Some(0)));

        cache.tick();
        assert!(cache.is_key_pressed(Key::Space, None));
        assert!(!cache.is_key_pressed(Key::Space, Some(0)));
    }

    #[test]
    fn repeated_press_events_do_not_reset_age() {
        let mut cache = InputCache::new();
        press(&mut cache, Key::ArrowRight);
        cache.tick();
        press(&mut cache, Key::ArrowRight);
        assert!(!cache.is_key_pressed(Key::ArrowRight, Some(0)));
    }

    #[test]
    fn untracked_buttons_count_as_released() {
        let cache = InputCache::new();
        assert!(!cache.is_key_pressed(Key::KeyW, None));
        assert!(!cache.is_mouse_button_pressed(MouseButton::Left, None));
    }

    #[test]
    fn cursor_delta_accumulates_within_a_tick() {
        let mut cache = InputCache::new();
        cache.track_cursor_movement(PhysicalPosition::new(100.0, 100.0));
        cache.tick();

        cache.track_cursor_movement(PhysicalPosition::new(140.0, 90.0));
        cache.track_cursor_movement(PhysicalPosition::new(150.0, 95.0));
        assert_eq!(cache.cursor_delta().x, 50.0);
        assert_eq!(cache.cursor_delta().y, -5.0);

        // deltas are per tick, positions persist
        cache.tick();
        assert_eq!(cache.cursor_delta().x, 0.0);
        assert_eq!(cache.cursor_position().x, 150.0);
    }

    #[test]
    fn scroll_lines_convert_to_pixels() {
        let mut cache = InputCache::new();
        cache.track_mouse_wheel(ev::MouseScrollDelta::LineDelta(0.0, 2.0));
        cache.track_mouse_wheel(ev::MouseScrollDelta::PixelDelta(PhysicalPosition::new(
            0.0, 5.0,
        )));
        assert_eq!(cache.scroll_delta(), 25.0);

        cache.tick();
        assert_eq!(cache.scroll_delta(), 0.0);
    }
}
