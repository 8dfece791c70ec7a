use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::BusWriter;
use crate::DimmerError;
use crate::bank::ChannelBank;
use crate::command::{DimmerCommand, Reply};
use crate::config::DimmerConfig;
use crate::flicker::{FlickerEngine, FlickerProgress};
use crate::jitter::DelaySource;
use crate::queue::CommandReceiver;
use crate::script::FlickerScript;
use crate::store::ParamStore;
use crate::task::{OneShotTask, TickResult};

/// Dimmer - owns the channel state and drives both periodic tasks
///
/// Everything runs on the caller's loop: [`handle`](Self::handle) for
/// direct requests and [`tick`](Self::tick) for queued commands, flicker
/// steps and channel flushes. Both run to completion, so no two mutations
/// ever interleave.
pub struct Dimmer<'a, B, S, D, const QUEUE_SIZE: usize>
where
    B: BusWriter,
    S: ParamStore,
    D: DelaySource,
{
    // External dependencies and configuration
    commands: CommandReceiver<'a, QUEUE_SIZE>,
    bus: B,
    store: S,
    delays: D,
    config: DimmerConfig<'a>,

    // Internal state
    bank: ChannelBank,
    flicker: FlickerEngine<'a>,
    flush_task: OneShotTask,
    flicker_task: OneShotTask,
}

impl<'a, B, S, D, const QUEUE_SIZE: usize> Dimmer<'a, B, S, D, QUEUE_SIZE>
where
    B: BusWriter,
    S: ParamStore,
    D: DelaySource,
{
    /// Create a dimmer. Call [`begin`](Self::begin) before the first tick.
    pub fn new(
        commands: CommandReceiver<'a, QUEUE_SIZE>,
        bus: B,
        store: S,
        delays: D,
        config: DimmerConfig<'a>,
    ) -> Self {
        Self {
            commands,
            bus,
            store,
            delays,
            config,
            bank: ChannelBank::new(),
            flicker: FlickerEngine::new(FlickerScript::new(config.script)),
            flush_task: OneShotTask::new(),
            flicker_task: OneShotTask::new(),
        }
    }

    /// Restore saved values and start the flush task
    ///
    /// Every channel is dirty afterwards, so the first flush pushes the
    /// restored state to the hardware.
    pub fn begin(&mut self, now: Instant) -> Result<(), DimmerError> {
        let restored = self.bank.restore_all(&self.store);
        self.flush_task.start(now, self.config.flush_period);
        restored
    }

    /// Run one step of the loop
    ///
    /// Drains queued commands, then plays a due flicker step, then flushes
    /// dirty channels if the flush period has elapsed.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        self.process_commands(now);

        if self.flicker_task.poll(now) {
            let progress = self.flicker.step(&mut self.bank);
            self.schedule_flicker(progress, now);
        }

        if self.flush_task.poll_periodic(now, self.config.flush_period) {
            self.bank.flush(&mut self.bus, self.config.polarity);
        }

        let next_deadline = [self.flush_task.deadline(), self.flicker_task.deadline()]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(now + self.config.flush_period);
        TickResult::until(next_deadline, now)
    }

    /// Execute one command right away
    pub fn handle(&mut self, command: DimmerCommand, now: Instant) -> Result<Reply, DimmerError> {
        match command {
            DimmerCommand::SetChannel { channel, value } => {
                self.bank.set_channel(channel, value)?;
            }
            DimmerCommand::SetAll(value) => self.bank.set_all(value)?,
            DimmerCommand::Save => self.bank.save_all(&mut self.store),
            DimmerCommand::Restore => self.bank.restore_all(&self.store)?,
            DimmerCommand::Read(channel) => return Ok(Reply::Value(self.bank.value(channel))),
            DimmerCommand::StartFlicker(targets) => {
                let progress = self.flicker.start(targets, &mut self.bank)?;
                self.schedule_flicker(progress, now);
            }
            DimmerCommand::StopFlicker => {
                self.flicker.stop();
                self.flicker_task.cancel();
            }
        }
        Ok(Reply::Done)
    }

    /// Process pending commands from the queue (non-blocking)
    fn process_commands(&mut self, now: Instant) {
        while let Some(command) = self.commands.try_receive() {
            if let Err(_err) = self.handle(command, now) {
                #[cfg(feature = "esp32-log")]
                println!("[Dimmer] {:?} rejected: {}", command, _err);
            }
        }
    }

    fn schedule_flicker(&mut self, progress: FlickerProgress, now: Instant) {
        if progress.is_continue() {
            self.flicker_task.start(now, self.delays.next_delay());
        }
    }

    pub const fn bank(&self) -> &ChannelBank {
        &self.bank
    }

    pub const fn flicker(&self) -> &FlickerEngine<'a> {
        &self.flicker
    }

    /// Time at which the next flicker step is due, if one is scheduled
    pub const fn next_flicker_step(&self) -> Option<Instant> {
        self.flicker_task.deadline()
    }

    pub const fn bus(&self) -> &B {
        &self.bus
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn config(&self) -> &DimmerConfig<'a> {
        &self.config
    }
}
