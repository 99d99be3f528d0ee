//! Kiosk display controller: turns robot commands into UI state, rotates on-screen
//! prompts per screen, and reports button presses back over the same channel.

pub mod channel;
pub mod controller;
pub mod dispatcher;
pub mod scheduler;
pub mod timers;
pub mod ui;

pub use channel::{ChannelAdapter, ChannelError, ChannelEvent, ReadyState, WsChannel};
pub use controller::{ControllerOptions, KioskController};
pub use dispatcher::CommandDispatcher;
pub use scheduler::{PromptScheduler, Rotation};
pub use timers::{PromptTick, TimerRegistry, DEFAULT_PROMPT_PERIOD, MIN_PROMPT_PERIOD};
pub use ui::{Control, ControlFactory, HeadlessUi, UiSurface};
