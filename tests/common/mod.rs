//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use keyflow::{Action, BindingContext, Input, InputConfig, KeyCode, RawEvent, Vec2Keys};

/// Which notification fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    Started,
    Performed,
    Cancelled,
}

/// One recorded notification
#[derive(Debug, Clone)]
pub struct Record {
    pub frame: u64,
    pub action: String,
    pub fired: Fired,
    pub context: BindingContext,
}

/// Notification log shared between subscribers and the test body
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    records: Rc<RefCell<Vec<Record>>>,
    frame: Rc<RefCell<u64>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all three notifications of `action`
    pub fn attach(&self, action: &mut Action) {
        let name = action.name().to_string();
        for fired in [Fired::Started, Fired::Performed, Fired::Cancelled] {
            let records = Rc::clone(&self.records);
            let frame = Rc::clone(&self.frame);
            let name = name.clone();
            let callback = move |ctx: &BindingContext| {
                records.borrow_mut().push(Record {
                    frame: *frame.borrow(),
                    action: name.clone(),
                    fired,
                    context: ctx.clone(),
                })
            };
            match fired {
                Fired::Started => action.started.add(callback),
                Fired::Performed => action.performed.add(callback),
                Fired::Cancelled => action.cancelled.add(callback),
            };
        }
    }

    /// Stamp subsequent records with this frame number
    pub fn set_frame(&self, frame: u64) {
        *self.frame.borrow_mut() = frame;
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// Notifications fired during `frame`, in order
    pub fn fired_in(&self, frame: u64) -> Vec<Fired> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.frame == frame)
            .map(|r| r.fired)
            .collect()
    }

    /// `(action, notification)` pairs in firing order
    pub fn sequence(&self) -> Vec<(String, Fired)> {
        self.records
            .borrow()
            .iter()
            .map(|r| (r.action.clone(), r.fired))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

/// Input with profile "Default" → map "Player" → action "Jump" bound to `key`
pub fn jump_input(key: KeyCode) -> (Input, Recorder) {
    let mut input = Input::default();
    let recorder = Recorder::new();
    let rec = recorder.clone();
    input
        .create_profile("Default", |profile| {
            profile.add_map("Player", |map| {
                map.add_action("Jump", |action| {
                    action.add_button("Keyboard", key)?;
                    rec.attach(action);
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .expect("fresh input accepts profile");
    (input, recorder)
}

/// Input with a "Player" map holding Jump (space), Move (WASD) and
/// Sprint (left shift), and a "Menu" map holding Confirm (enter)
pub fn game_input(config: InputConfig) -> (Input, Recorder) {
    let mut input = Input::new(config);
    let recorder = Recorder::new();
    let rec = recorder.clone();
    input
        .create_profile("Default", |profile| {
            profile.add_map("Player", |map| {
                map.add_action("Jump", |action| {
                    action.add_button("Keyboard", KeyCode::Space)?;
                    rec.attach(action);
                    Ok(())
                })?;
                map.add_action("Move", |action| {
                    action.add_vec2_default("WASD", Vec2Keys::wasd())?;
                    rec.attach(action);
                    Ok(())
                })?;
                map.add_action("Sprint", |action| {
                    action.add_button("Keyboard", KeyCode::LeftShift)?;
                    rec.attach(action);
                    Ok(())
                })?;
                Ok(())
            })?;
            profile.add_map("Menu", |map| {
                map.add_action("Confirm", |action| {
                    action.add_button("Keyboard", KeyCode::Enter)?;
                    rec.attach(action);
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .expect("fresh input accepts profile");
    (input, recorder)
}

/// Run one frame with the given events, stamping records with its index
pub fn step(input: &mut Input, recorder: &Recorder, events: &[RawEvent]) -> u64 {
    let frame = input.frame();
    recorder.set_frame(frame);
    for event in events {
        input.ingest(*event);
    }
    input.update();
    frame
}
