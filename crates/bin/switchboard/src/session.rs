//! Interactive menu — reads one choice at a time and drives the remote.
//!
//! Key `0` exits, key `9` undoes everything, any other number selects a
//! device by its 1-based position. Bad input is reported here and never
//! reaches the remote. End of input is treated like `0`.

use std::io::{self, BufRead, Write};

use switchboard_app::ports::DeviceStore;
use switchboard_app::remote::{Remote, UndoOutcome, Undone};
use switchboard_domain::command::DeviceAction;
use switchboard_domain::device::Transition;
use switchboard_domain::error::SwitchboardError;
use switchboard_domain::id::DeviceId;
use switchboard_domain::power::PowerState;

use crate::setup::{action_label, command_name};

const EXIT: &str = "0";
const UNDO_ALL: &str = "9";

/// One interactive session over a remote.
pub struct Session<'a, S, R, W> {
    remote: &'a mut Remote<S>,
    input: R,
    output: W,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: DeviceStore,
    R: BufRead,
    W: Write,
{
    pub fn new(remote: &'a mut Remote<S>, input: R, output: W) -> Self {
        Self {
            remote,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input runs out.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading input or writing output.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.render_devices()?;
            let Some(choice) = self.prompt("Escolha o dispositivo que deseja controlar: ")? else {
                break;
            };
            match choice.as_str() {
                EXIT => break,
                UNDO_ALL => self.undo_all()?,
                other => {
                    if !self.select_device(other)? {
                        break;
                    }
                }
            }
        }
        writeln!(self.output, "Saindo...")?;
        self.output.flush()
    }

    fn render_devices(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nEstado atual dos dispositivos:")?;
        for (index, device) in self.remote.devices().iter().enumerate() {
            writeln!(
                self.output,
                "{} - {}: {}",
                index + 1,
                device.name,
                status_label(device.status())
            )?;
        }
        writeln!(self.output, "{EXIT} - Sair")?;
        writeln!(self.output, "{UNDO_ALL} - Desfazer todas as ações")
    }

    /// Handle a device selection. Returns `false` once input is exhausted.
    fn select_device(&mut self, choice: &str) -> io::Result<bool> {
        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| {
                self.remote
                    .devices()
                    .get(index)
                    .map(|d| (d.id, d.name.clone()))
            });
        let Some((device_id, name)) = selected else {
            tracing::debug!(choice, "invalid device selection");
            writeln!(self.output, "Opção inválida. Tente novamente.")?;
            return Ok(true);
        };

        writeln!(self.output, "\nAções disponíveis para {name}:")?;
        writeln!(self.output, "1 - {}", action_label(DeviceAction::TurnOn))?;
        writeln!(self.output, "2 - {}", action_label(DeviceAction::TurnOff))?;
        let Some(action) = self.prompt("Escolha uma ação: ")? else {
            return Ok(false);
        };
        let action = match action.as_str() {
            "1" => DeviceAction::TurnOn,
            "2" => DeviceAction::TurnOff,
            _ => {
                writeln!(self.output, "Ação inválida. Tente novamente.")?;
                return Ok(true);
            }
        };

        self.press(&command_name(&name, action), device_id)?;
        Ok(true)
    }

    fn press(&mut self, button: &str, device_id: DeviceId) -> io::Result<()> {
        match self.remote.press(button) {
            Ok(press) => {
                let name = self.device_name(press.device_id);
                writeln!(self.output, "{}", describe(&name, press.transition))
            }
            Err(SwitchboardError::UnknownCommand { name }) => {
                writeln!(self.output, "Botão '{name}' não configurado.")
            }
            Err(err) => {
                tracing::error!(%err, button, %device_id, "press failed");
                writeln!(self.output, "Erro: {err}")
            }
        }
    }

    fn undo_all(&mut self) -> io::Result<()> {
        match self.remote.undo_all() {
            Ok(undone) => {
                writeln!(self.output, "\nDesfazendo todas as ações...")?;
                for entry in undone {
                    self.render_undone(&entry)?;
                }
                Ok(())
            }
            Err(SwitchboardError::NothingToUndo) => {
                writeln!(self.output, "Nenhuma ação para desfazer.")
            }
            Err(err) => {
                tracing::error!(%err, "undo failed");
                writeln!(self.output, "Erro: {err}")
            }
        }
    }

    fn render_undone(&mut self, entry: &Undone) -> io::Result<()> {
        let name = self.device_name(entry.device_id);
        match entry.outcome {
            UndoOutcome::Applied(transition) => {
                writeln!(self.output, "{}", describe(&name, transition))
            }
            UndoOutcome::Skipped => writeln!(
                self.output,
                "'{}' não alterou {name}; nada a desfazer.",
                entry.name
            ),
        }
    }

    fn device_name(&self, id: DeviceId) -> String {
        self.remote
            .device(id)
            .map_or_else(|| id.to_string(), |d| d.name.clone())
    }

    /// Print `message` and read one trimmed line, `None` on end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn status_label(state: PowerState) -> &'static str {
    match state {
        PowerState::On => "ligado",
        PowerState::Off => "desligado",
    }
}

fn describe(name: &str, transition: Transition) -> String {
    match transition {
        Transition::Changed { to, .. } => format!("{name} {}.", status_label(to)),
        Transition::Unchanged { state } => format!("{name} já está {}.", status_label(state)),
    }
}
