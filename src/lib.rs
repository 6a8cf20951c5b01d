//! keyflow - frame-polled input actions
//!
//! Raw key events are folded into a double-buffered polling state once per
//! frame. Actions grouped into maps and profiles compare the previous and
//! current frame through their bindings and fire `started`, `performed` and
//! `cancelled` notifications on the transitions.
//!
//! ```no_run
//! use keyflow::{Input, KeyCode, RawEvent};
//!
//! let mut input = Input::default();
//! input
//!     .create_profile("Keyboard", |profile| {
//!         profile.add_map("Player", |map| {
//!             map.add_action("Jump", |action| {
//!                 action.add_button("Space", KeyCode::Space)?;
//!                 action.started.add(|_| println!("jump!"));
//!                 Ok(())
//!             })?;
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })
//!     .expect("names are unique");
//!
//! input.ingest(RawEvent::KeyDown(KeyCode::Space));
//! input.update();
//! ```

pub mod action;
pub mod action_map;
pub mod action_profile;
pub mod binding;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod event;
pub mod input;
pub mod math;
pub mod polling;
pub mod registry;
pub mod status;
pub mod tracing;
pub mod types;
pub mod winit_adapter;

// Re-export commonly used types
pub use action::{Action, EvaluationPolicy};
pub use action_map::ActionMap;
pub use action_profile::ActionProfile;
pub use binding::{
    AnalogBinding, Binding, BindingContext, BindingKind, BindingValue, ButtonBinding, Evaluation,
    Vec2Binding, Vec2Keys,
};
pub use config::{ConfigError, InputConfig};
pub use error::{InputError, Scope};
pub use event::{Event, Subscription};
pub use input::{Input, InputSender, RawEvent};
pub use math::Vec2;
pub use polling::{PollingData, PollingState};
pub use status::InputStatus;
pub use types::{KeyCode, ModifierKey, ParseKeyError};
