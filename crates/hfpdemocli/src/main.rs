//! Console front end for the hands-free demo
//!
//! Reads commands from standard input, one per line, and runs them against
//! the in-process loopback stack until `Quit` or end of input.

use clap::{ArgAction, Parser, ValueEnum};
use hfpdemo::console::Console;
use hfpdemo::{HciDriverConfig, PlatformConfig, RecordingStack, Shell, StdoutConsole, UartProtocol};
use log::{error, info, LevelFilter};
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "hfpdemo", version, about = "Bluetooth Hands-Free unit console")]
struct Args {
    /// How the stack reaches the controller
    #[arg(long, value_enum, default_value_t = Transport::Uart)]
    transport: Transport,

    /// UART port number
    #[arg(long, default_value_t = 1)]
    port: u32,

    #[arg(long, default_value_t = 115_200)]
    baud: u32,

    /// UART framing
    #[arg(long, value_enum, default_value_t = Protocol::Hcill)]
    protocol: Protocol,

    /// Delay between controller reset and the first HCI command, in ms
    #[arg(long, default_value_t = 100)]
    init_delay_ms: u64,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Transport {
    Usb,
    Uart,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Protocol {
    Uart,
    RtsCts,
    Bcsp,
    Hcill,
}

impl From<Protocol> for UartProtocol {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Uart => UartProtocol::Uart,
            Protocol::RtsCts => UartProtocol::UartRtsCts,
            Protocol::Bcsp => UartProtocol::Bcsp,
            Protocol::Hcill => UartProtocol::Hcill,
        }
    }
}

impl Args {
    fn driver(&self) -> HciDriverConfig {
        match self.transport {
            Transport::Usb => HciDriverConfig::Usb,
            Transport::Uart => HciDriverConfig::Uart {
                port: self.port,
                baud_rate: self.baud,
                protocol: self.protocol.into(),
            },
        }
    }

    fn platform(&self) -> PlatformConfig {
        PlatformConfig {
            initialization_delay: Duration::from_millis(self.init_delay_ms),
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(args.log_level())
        .format_timestamp_millis()
        .init();

    info!("no controller attached, running on the loopback stack");
    let mut shell = Shell::new(RecordingStack::new(), Box::new(StdoutConsole));
    if let Err(e) = shell.initialize_application(&args.driver(), &args.platform()) {
        error!("{} ({})", e, e.code());
        return ExitCode::FAILURE;
    }

    let mut console = StdoutConsole;
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("reading input: {}", e);
                break;
            }
        };

        shell.pump_events();
        if !shell.process_line(&line) {
            console.prompt();
        }
        shell.pump_events();

        if shell.exit_requested() {
            break;
        }
    }

    let _ = shell.session_mut().close_stack();
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_uart_driver() {
        let args = Args::parse_from(["hfpdemo", "--port", "4", "--baud", "921600", "--protocol", "bcsp"]);
        assert_eq!(
            args.driver(),
            HciDriverConfig::Uart {
                port: 4,
                baud_rate: 921_600,
                protocol: UartProtocol::Bcsp,
            }
        );
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_args_usb_and_verbosity() {
        let args = Args::parse_from(["hfpdemo", "--transport", "usb", "-vv", "--init-delay-ms", "250"]);
        assert_eq!(args.driver(), HciDriverConfig::Usb);
        assert_eq!(args.log_level(), LevelFilter::Debug);
        assert_eq!(args.platform().initialization_delay, Duration::from_millis(250));
    }
}
