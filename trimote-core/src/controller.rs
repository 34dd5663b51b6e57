//! The controller and its loop iteration
//!
//! [`Controller`] owns everything the main loop mutates: the peer registry,
//! the speed table, the status lines, the heartbeat counter and the redraw
//! flag. The only state it shares with another context is the
//! [`HeartbeatTimer`], which it reads through a reference.
//!
//! One call to [`Controller::run_iteration`] is one pass of the loop:
//!
//! 1. buttons, speed-down before speed-up
//! 2. at most one serial byte
//! 3. heartbeat, if the tick source raised it
//! 4. redraw, if anything changed since the last one

use trimote_protocol::{Con2DevRecord, MacText, MotorCommand};

use crate::config::{ControllerConfig, MAX_PEERS};
use crate::dispatch::{lookup, Button, InputEvent};
use crate::heartbeat::HeartbeatTimer;
use crate::redraw::RedrawFlag;
use crate::registry::{PeerRegistry, RegistryError};
use crate::speed::{SpeedLabel, SpeedTable, SpeedTableError};
use crate::status::StatusLines;
use crate::traits::{ButtonInput, DisplaySink, RadioError, RadioTransport, SerialInput};
use crate::view::DisplayView;

/// Errors building a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Transport refused a peer
    Radio(RadioError),
    /// Peer list is invalid
    Registry(RegistryError),
    /// Speed table is invalid
    SpeedTable(SpeedTableError),
    /// Transport assigned a different id than registration order
    IdMismatch,
}

impl From<RadioError> for ControllerError {
    fn from(e: RadioError) -> Self {
        ControllerError::Radio(e)
    }
}

impl From<RegistryError> for ControllerError {
    fn from(e: RegistryError) -> Self {
        ControllerError::Registry(e)
    }
}

impl From<SpeedTableError> for ControllerError {
    fn from(e: SpeedTableError) -> Self {
        ControllerError::SpeedTable(e)
    }
}

/// What handling one input event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchOutcome {
    /// Record handed to the transport
    Sent(Con2DevRecord),
    /// Transport rejected the record; status was still updated
    SendFailed(Con2DevRecord, RadioError),
    /// Byte outside the command table, echoed on the first status line
    Echoed(u8),
    /// Speed selection changed (or hit a limit); carries the new speed
    SpeedChanged(i16),
}

/// Summary of one loop iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IterationSummary {
    /// Outcome of the serial byte, if one was read
    pub serial: Option<DispatchOutcome>,
    /// Number of button presses handled
    pub buttons: u8,
    /// A heartbeat was processed
    pub heartbeat: bool,
    /// The display was redrawn
    pub redrawn: bool,
}

/// Remote controller state
pub struct Controller<R> {
    radio: R,
    registry: PeerRegistry,
    addresses: [MacText; MAX_PEERS],
    speeds: SpeedTable,
    speed_label: SpeedLabel,
    status: StatusLines,
    heartbeat: u16,
    redraw: RedrawFlag,
}

impl<R: RadioTransport> Controller<R> {
    /// Register the configured peers and build the initial state
    ///
    /// The first iteration always redraws.
    pub fn new(config: &ControllerConfig, mut radio: R) -> Result<Self, ControllerError> {
        let mut registry = PeerRegistry::new();
        for &mac in config.peers.iter() {
            let expected = registry.register(mac)?;
            let assigned = radio.register_peer(mac)?;
            if assigned != expected {
                return Err(ControllerError::IdMismatch);
            }
        }

        let speeds = SpeedTable::from_config(&config.speed)?;
        let speed_label = speeds.label();

        Ok(Self {
            radio,
            addresses: registry.address_texts(),
            registry,
            speeds,
            speed_label,
            status: StatusLines::new(),
            heartbeat: 0,
            redraw: RedrawFlag::pending(),
        })
    }

    /// Apply one input event
    ///
    /// Drive characters cause exactly one send; nothing else sends. Every
    /// branch requests a redraw.
    pub fn handle_command(&mut self, event: InputEvent) -> DispatchOutcome {
        let outcome = match event {
            InputEvent::Serial(byte) => match lookup(byte) {
                Some(binding) => {
                    let record = match binding.command {
                        MotorCommand::Stop => Con2DevRecord::stop(binding.device),
                        command => {
                            Con2DevRecord::new(binding.device, command, self.speeds.current())
                        }
                    };
                    let result = self.radio.send(binding.device, &record);
                    self.status
                        .record_command(byte, binding.device, binding.command);
                    match result {
                        Ok(()) => DispatchOutcome::Sent(record),
                        Err(e) => DispatchOutcome::SendFailed(record, e),
                    }
                }
                None => {
                    self.status.record_unknown(byte);
                    DispatchOutcome::Echoed(byte)
                }
            },
            InputEvent::Button(button) => {
                match button {
                    Button::SpeedDown => self.speeds.step_down(),
                    Button::SpeedUp => self.speeds.step_up(),
                }
                self.speed_label = self.speeds.label();
                DispatchOutcome::SpeedChanged(self.speeds.current())
            }
        };

        self.redraw.request();
        outcome
    }

    /// Consume one heartbeat
    pub fn heartbeat_process(&mut self) {
        self.heartbeat = self.heartbeat.wrapping_add(1);
        self.redraw.request();
    }

    /// Run one pass of the main loop
    pub fn run_iteration(
        &mut self,
        buttons: &mut impl ButtonInput,
        serial: &mut impl SerialInput,
        timer: &HeartbeatTimer,
        display: &mut impl DisplaySink,
    ) -> IterationSummary {
        let mut summary = IterationSummary::default();

        for button in Button::POLL_ORDER {
            if buttons.was_pressed(button) {
                self.handle_command(InputEvent::Button(button));
                summary.buttons += 1;
            }
        }

        if let Some(byte) = serial.read_byte() {
            summary.serial = Some(self.handle_command(InputEvent::Serial(byte)));
        }

        if timer.take_due() {
            self.heartbeat_process();
            summary.heartbeat = true;
        }

        if self.redraw.consume_if_pending() {
            display.render(&self.view());
            summary.redrawn = true;
        }

        summary
    }
}

impl<R> Controller<R> {
    /// Current screen contents
    pub fn view(&self) -> DisplayView<'_> {
        DisplayView {
            addresses: &self.addresses,
            speed: &self.speed_label,
            status: self.status.lines(),
            heartbeat: self.heartbeat,
        }
    }

    pub fn speed(&self) -> i16 {
        self.speeds.current()
    }

    pub fn speed_index(&self) -> usize {
        self.speeds.index()
    }

    pub fn speed_label(&self) -> &str {
        &self.speed_label
    }

    pub fn heartbeat_count(&self) -> u16 {
        self.heartbeat
    }

    pub fn status(&self) -> &StatusLines {
        &self.status
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw.is_pending()
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_PEERS, DEFAULT_SPEEDS};
    use heapless::Vec;
    use trimote_protocol::{DeviceId, MacAddr};

    #[derive(Default)]
    struct MockRadio {
        peers: Vec<MacAddr, MAX_PEERS>,
        sent: Vec<(DeviceId, Con2DevRecord), 32>,
        reject_sends: bool,
    }

    impl RadioTransport for MockRadio {
        fn register_peer(&mut self, mac: MacAddr) -> Result<DeviceId, RadioError> {
            self.peers.push(mac).map_err(|_| RadioError::PeerTableFull)?;
            DeviceId::new(self.peers.len() as u8).ok_or(RadioError::PeerTableFull)
        }

        fn send(&mut self, id: DeviceId, record: &Con2DevRecord) -> Result<(), RadioError> {
            if self.reject_sends {
                return Err(RadioError::QueueFull);
            }
            let _ = self.sent.push((id, *record));
            Ok(())
        }
    }

    fn controller() -> Controller<MockRadio> {
        Controller::new(&ControllerConfig::default(), MockRadio::default()).unwrap()
    }

    fn id(raw: u8) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    #[test]
    fn test_new_registers_peers_in_order() {
        let controller = controller();
        assert_eq!(controller.radio().peers.as_slice(), &DEFAULT_PEERS);
        assert_eq!(controller.registry().len(), 3);
        assert_eq!(controller.view().addresses[1].as_str(), "98:A3:16:8F:7B:20");
        assert_eq!(controller.speed_label(), "Spd. 12000");
        assert!(controller.redraw_pending());
    }

    #[test]
    fn test_new_rejects_duplicate_peer() {
        let mut config = ControllerConfig::default();
        config.peers[2] = config.peers[0];
        assert_eq!(
            Controller::new(&config, MockRadio::default()).err(),
            Some(ControllerError::Registry(RegistryError::Duplicate))
        );
    }

    #[test]
    fn test_every_drive_character() {
        let expected = [
            (b'q', 1, MotorCommand::Left),
            (b'e', 1, MotorCommand::Right),
            (b'w', 1, MotorCommand::Stop),
            (b'a', 2, MotorCommand::Left),
            (b'd', 2, MotorCommand::Right),
            (b's', 2, MotorCommand::Stop),
            (b'z', 3, MotorCommand::Left),
            (b'c', 3, MotorCommand::Right),
            (b'x', 3, MotorCommand::Stop),
        ];

        for (symbol, device, command) in expected {
            let mut controller = controller();
            controller.handle_command(InputEvent::Serial(symbol));

            let sent = &controller.radio().sent;
            assert_eq!(sent.len(), 1);
            let (to, record) = sent[0];
            assert_eq!(to, id(device));
            assert_eq!(record.id, id(device));
            assert_eq!(record.command, command);
            let speed = if command.is_drive() { 12000 } else { 0 };
            assert_eq!(record.speed, speed);
        }
    }

    #[test]
    fn test_stop_carries_zero_at_every_speed() {
        let mut controller = controller();
        for _ in 0..DEFAULT_SPEEDS.len() {
            controller.handle_command(InputEvent::Button(Button::SpeedDown));
        }
        for _ in 0..DEFAULT_SPEEDS.len() {
            for symbol in [b'w', b's', b'x'] {
                controller.handle_command(InputEvent::Serial(symbol));
            }
            controller.handle_command(InputEvent::Button(Button::SpeedUp));
        }
        let sent = &controller.radio().sent;
        assert_eq!(sent.len(), 3 * DEFAULT_SPEEDS.len());
        assert!(sent.iter().all(|(_, r)| r.speed == 0));
    }

    #[test]
    fn test_every_unknown_byte_echoes_without_send() {
        for byte in (0u8..=255).filter(|b| lookup(*b).is_none()) {
            let mut controller = controller();
            controller.redraw.consume_if_pending();

            let outcome = controller.handle_command(InputEvent::Serial(byte));
            assert_eq!(outcome, DispatchOutcome::Echoed(byte));
            assert!(controller.radio().sent.is_empty(), "byte {:#04x} sent", byte);

            let mut utf8 = [0u8; 4];
            let expected = (byte as char).encode_utf8(&mut utf8);
            assert_eq!(controller.status().line(0), expected, "byte {:#04x}", byte);
            assert!(controller.redraw_pending());
        }
    }

    #[test]
    fn test_speed_clamp_still_requests_redraw() {
        let mut controller = controller();
        for _ in 0..10 {
            controller.handle_command(InputEvent::Button(Button::SpeedUp));
        }
        controller.redraw.consume_if_pending();

        let outcome = controller.handle_command(InputEvent::Button(Button::SpeedUp));
        assert_eq!(outcome, DispatchOutcome::SpeedChanged(30000));
        assert!(controller.redraw_pending());
        assert!(controller.radio().sent.is_empty());
    }

    #[test]
    fn test_speed_clamp_at_slowest_still_requests_redraw() {
        let mut controller = controller();
        for _ in 0..DEFAULT_SPEEDS.len() {
            controller.handle_command(InputEvent::Button(Button::SpeedDown));
        }
        assert_eq!(controller.speed_index(), 0);
        controller.redraw.consume_if_pending();

        let outcome = controller.handle_command(InputEvent::Button(Button::SpeedDown));
        assert_eq!(outcome, DispatchOutcome::SpeedChanged(DEFAULT_SPEEDS[0]));
        assert_eq!(controller.speed_index(), 0);
        assert!(controller.redraw_pending());
        assert!(controller.radio().sent.is_empty());
    }

    #[test]
    fn test_send_failure_still_updates_status() {
        let mut controller = controller();
        controller.radio_mut().reject_sends = true;

        let outcome = controller.handle_command(InputEvent::Serial(b'e'));
        assert_eq!(
            outcome,
            DispatchOutcome::SendFailed(
                Con2DevRecord::new(id(1), MotorCommand::Right, 12000),
                RadioError::QueueFull
            )
        );
        assert_eq!(controller.status().line(0), "e, Mot.1 Right");
    }

    #[test]
    fn test_heartbeat_counter_wraps() {
        let mut controller = controller();
        controller.heartbeat = u16::MAX;
        controller.heartbeat_process();
        assert_eq!(controller.heartbeat_count(), 0);
        assert!(controller.redraw_pending());
    }
}
