use log::debug;

use crate::BootloaderTrigger;

/// Returned from binding handlers to the keymap dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorStatus {
    /// The event was consumed.
    Opaque,
    /// The event falls through to the next layer.
    Transparent,
}

/// Where a behavior runs on split keyboards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locality {
    Central,
    EventSource,
    Global,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindingEvent {
    pub layer: u8,
    pub position: u32,
    pub timestamp_ms: i64,
}

/// A key binding's press/release pair.
pub trait Behavior {
    fn binding_pressed(&self, event: BindingEvent) -> BehaviorStatus;

    fn binding_released(&self, event: BindingEvent) -> BehaviorStatus;

    fn locality(&self) -> Locality {
        Locality::Central
    }
}

pub struct BootloaderBehavior<'a> {
    trigger: BootloaderTrigger<'a>,
}

impl<'a> BootloaderBehavior<'a> {
    pub const fn new(trigger: BootloaderTrigger<'a>) -> Self {
        Self { trigger }
    }
}

impl Behavior for BootloaderBehavior<'_> {
    fn binding_pressed(&self, event: BindingEvent) -> BehaviorStatus {
        debug!("bootloader binding pressed at position {}", event.position);
        self.trigger.fire()
    }

    fn binding_released(&self, _event: BindingEvent) -> BehaviorStatus {
        BehaviorStatus::Opaque
    }
}
