// Bridges Wayland key events into the overlay's key-down/key-up API.
use log::debug;
use smithay_client_toolkit::seat::keyboard::{
    KeyEvent as XkbKeyEvent, KeyboardHandler, Keysym, Modifiers as XkbModifiers, RawModifiers,
};
use wayland_client::{
    Connection, QueueHandle,
    protocol::{wl_keyboard, wl_surface},
};

use crate::input::KeyEvent;
use crate::overlay::KeyDownOutcome;

use super::super::keymap::{keysym_to_key, modifiers_from_xkb};
use super::super::state::WaylandState;

impl WaylandState {
    fn forward_key_down(&mut self, event: &XkbKeyEvent) {
        let key = keysym_to_key(event.keysym);
        let event = KeyEvent::down(key, self.modifiers);
        if self.overlay.on_key_down(&event) == KeyDownOutcome::ExitRequested {
            debug!("Exit shortcut received through the seat");
        }
    }
}

impl KeyboardHandler for WaylandState {
    fn enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
        _raw: &[u32],
        _keysyms: &[Keysym],
    ) {
        debug!("Keyboard focus entered");
    }

    fn leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
    ) {
        debug!("Keyboard focus left");
    }

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: XkbKeyEvent,
    ) {
        self.forward_key_down(&event);
    }

    fn release_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: XkbKeyEvent,
    ) {
        let key = keysym_to_key(event.keysym);
        self.overlay.on_key_up(&KeyEvent::up(key, self.modifiers));
    }

    fn update_modifiers(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        modifiers: XkbModifiers,
        _layout: RawModifiers,
        _group: u32,
    ) {
        self.modifiers = modifiers_from_xkb(&modifiers);
        debug!("Modifiers: {:?}", self.modifiers);
    }

    fn repeat_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: XkbKeyEvent,
    ) {
        // A repeat restarts the pop-in like a fresh press.
        self.forward_key_down(&event);
    }
}
