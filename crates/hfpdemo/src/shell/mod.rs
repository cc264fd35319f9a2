//! Line-oriented command interpreter
//!
//! The [`Shell`] owns the session, the command table and the receiving end
//! of the stack's event channel. Input lines and stack events are both
//! processed on the caller's thread, one at a time.

pub mod parser;
pub mod registry;


pub use parser::{parse_command, Command, Parameter};
pub use registry::{CommandEntry, CommandFn, CommandRegistry};

use crate::commands;
use crate::config::{HciDriverConfig, PlatformConfig, MAX_SUPPORTED_COMMANDS};
use crate::console::Console;
use crate::error::{ApplicationError, RegistryError, ShellError};
use crate::session::Session;
use crate::stack::{event_channel, BluetoothStack, EventReceiver, StackEvent};
use log::{debug, error, info};

/// What the interpreter should do after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Exit,
}

pub struct Shell<S: BluetoothStack> {
    session: Session<S>,
    registry: CommandRegistry<S>,
    events: EventReceiver,
    exit_requested: bool,
}

impl<S: BluetoothStack> Shell<S> {
    pub fn new(stack: S, console: Box<dyn Console>) -> Self {
        let (sender, events) = event_channel();
        Self {
            session: Session::new(stack, console, sender),
            registry: CommandRegistry::new(MAX_SUPPORTED_COMMANDS),
            events,
            exit_requested: false,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    pub fn registry(&self) -> &CommandRegistry<S> {
        &self.registry
    }

    /// Whether a `QUIT` command has been processed
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Replace the command table with the full command set
    pub fn register_commands(&mut self) -> Result<(), RegistryError> {
        self.registry.clear();
        commands::register_all(&mut self.registry)
    }

    /// Open the stack and bring the device into its listening state.
    ///
    /// Runs open, connectable, discoverable and pairable in order, then
    /// fills the command table, prints the help banner and the prompt.
    /// A failure after the stack opened closes it again.
    pub fn initialize_application(
        &mut self,
        driver: &HciDriverConfig,
        platform: &PlatformConfig,
    ) -> Result<u32, ApplicationError> {
        driver.validate().map_err(ApplicationError::InvalidParameters)?;
        platform
            .validate()
            .map_err(ApplicationError::InvalidParameters)?;

        let stack_id = match self.session.open_stack(driver, platform) {
            Ok(stack_id) => stack_id,
            Err(e) => {
                self.session.display("Unable to open the stack.");
                return Err(e.into());
            }
        };

        if let Err(e) = self.bring_up() {
            error!("initialization failed: {}", e);
            let _ = self.session.close_stack();
            return Err(e.into());
        }

        commands::display_help(&mut self.session);
        self.session.prompt();
        info!("application initialized on stack {}", stack_id);
        Ok(stack_id)
    }

    fn bring_up(&mut self) -> Result<(), ShellError> {
        let steps: [(&str, fn(&mut Session<S>) -> Result<(), ShellError>); 3] = [
            ("SetConnect", Session::set_connectable),
            ("SetDisc", Session::set_discoverable),
            ("SetPairable", Session::set_pairable),
        ];
        for (name, step) in steps {
            if let Err(e) = step(&mut self.session) {
                self.session
                    .display(format!("Error - {} returned {}.", name, e.code()));
                return Err(e);
            }
        }

        self.register_commands().map_err(|e| {
            error!("command table: {}", e);
            ShellError::FunctionError
        })
    }

    /// Process one input line.
    ///
    /// Returns `false` when the line could not be parsed, `true` when a
    /// command was looked up and run (successfully or not). The prompt is
    /// redisplayed after every parsed line.
    pub fn process_line(&mut self, line: &str) -> bool {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                debug!("unparsable line {:?}: {}", line, e);
                self.session.display("Invalid Command.");
                return false;
            }
        };

        match self.execute(&command) {
            Ok(Dispatch::Continue) => {}
            Ok(Dispatch::Exit) => self.exit_requested = true,
            Err(ShellError::InvalidCommand(name)) => {
                self.session.display(format!("Invalid Command: {}.", name));
            }
            Err(e) => {
                debug!("{} failed: {} ({})", command.name(), e, e.code());
                if let ShellError::Stack { .. } = e {
                    self.session.display(e.to_string());
                }
                self.session.display("Function Error.");
            }
        }

        self.session.prompt();
        true
    }

    /// Look up and run a parsed command
    pub fn execute(&mut self, command: &Command) -> Result<Dispatch, ShellError> {
        let name = command.name().to_ascii_uppercase();
        if name.starts_with("QUIT") {
            return Ok(Dispatch::Exit);
        }

        let handler = self
            .registry
            .find(&name)
            .ok_or_else(|| ShellError::InvalidCommand(name.clone()))?;
        debug!("running {}", name);
        handler(&mut self.session, command.parameters())?;
        Ok(Dispatch::Continue)
    }

    /// Handle every event the stack has delivered so far.
    /// Returns the number handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: StackEvent) {
        match event {
            StackEvent::Gap(event) => self.session.handle_gap_event(event),
            StackEvent::Hfre(event) => self.session.handle_hfre_event(event),
        }
    }
}
