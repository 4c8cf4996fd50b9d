pub mod buffer;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod events;
pub mod folders;
pub mod label;
pub mod logging;
pub mod meta;
pub mod platform;
pub mod scan;
pub mod setup;
pub mod shell;
pub mod processing {
    pub mod layout;
    pub mod resize;
}
pub mod render {
    pub mod canvas;
    pub mod font;
    pub mod window;
}
pub mod tasks {
    pub mod loader;
    pub mod playback;
    pub mod timer;
}
