//! Command queue between the network side and the run loop
//!
//! Request handlers may run in another task or an interrupt, so the queue
//! state sits behind a `critical-section` mutex. Commands that do not fit
//! are rejected with [`DimmerError::QueueFull`] and counted.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DimmerError;
use crate::command::DimmerCommand;

struct Pending<const SIZE: usize> {
    commands: Deque<DimmerCommand, SIZE>,
    dropped: u32,
}

/// Bounded FIFO of [`DimmerCommand`]s
pub struct CommandQueue<const SIZE: usize> {
    pending: Mutex<RefCell<Pending<SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(Pending {
                commands: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Handle for request handlers. Any number may coexist.
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    /// Handle for the run loop
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    /// Number of commands waiting
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.pending.borrow_ref(cs).commands.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of commands rejected because the queue was full
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.pending.borrow_ref(cs).dropped)
    }

    /// Drop every waiting command, returns how many were discarded
    pub fn clear(&self) -> usize {
        critical_section::with(|cs| {
            let mut pending = self.pending.borrow_ref_mut(cs);
            let count = pending.commands.len();
            pending.commands.clear();
            count
        })
    }

    fn push(&self, command: DimmerCommand) -> Result<(), DimmerError> {
        critical_section::with(|cs| {
            let mut pending = self.pending.borrow_ref_mut(cs);
            if pending.commands.push_back(command).is_err() {
                pending.dropped = pending.dropped.saturating_add(1);
                #[cfg(feature = "esp32-log")]
                println!("[CommandQueue] queue full, dropping {:?}", command);
                return Err(DimmerError::QueueFull);
            }
            Ok(())
        })
    }

    fn pop(&self) -> Option<DimmerCommand> {
        critical_section::with(|cs| self.pending.borrow_ref_mut(cs).commands.pop_front())
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`CommandQueue`]
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Enqueue a command, fails with [`DimmerError::QueueFull`]
    pub fn try_send(&self, command: DimmerCommand) -> Result<(), DimmerError> {
        self.queue.push(command)
    }

    /// Route a request path and enqueue the resulting command
    ///
    /// Returns `Ok(false)` if the path is not a dimmer route.
    pub fn send_route(&self, path: &str) -> Result<bool, DimmerError> {
        let Some(command) = DimmerCommand::parse_route(path) else {
            return Ok(false);
        };
        self.queue.push(command)?;
        Ok(true)
    }
}

/// Receiving half of a [`CommandQueue`]
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Take the oldest waiting command
    pub fn try_receive(&self) -> Option<DimmerCommand> {
        self.queue.pop()
    }
}
