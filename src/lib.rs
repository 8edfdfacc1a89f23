pub mod autosave;
pub mod clipboard;
pub mod controller;
pub mod drag;
pub mod gui;
pub mod hotkey;
pub mod input;
pub mod logging;
pub mod note_store;
pub mod settings;
pub mod visibility;
pub mod window_style;
