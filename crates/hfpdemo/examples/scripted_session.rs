use hfpdemo::gap::{AuthenticationEvent, IoCapability, PairingPolicy};
use hfpdemo::hfre::CodecId;
use hfpdemo::{
    BdAddr, GapEvent, HciDriverConfig, HfreEvent, PlatformConfig, PortId, RecordingStack, Shell,
    StdoutConsole,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let gateway = BdAddr::new([0x9A, 0x78, 0x56, 0x34, 0x12, 0x00]);

    // Bring the device up on the loopback stack
    let mut shell = Shell::new(RecordingStack::new(), Box::new(StdoutConsole));
    let stack_id = shell.initialize_application(&HciDriverConfig::Usb, &PlatformConfig::default())?;
    println!("\nStack {} ready", stack_id);

    for line in ["GetLocalAddress", "OpenHFServer 1", "Inquiry"] {
        println!("{}", line);
        shell.process_line(line);
    }

    // Play the part of the audio gateway: it is found, pairs with
    // numeric comparison, connects and asks for wideband audio
    let stack = shell.session().stack();
    stack.emit_gap(Some(GapEvent::InquiryResult {
        devices: vec![gateway],
    }));
    stack.emit_gap(Some(GapEvent::Authentication {
        remote_device: gateway,
        event: AuthenticationEvent::IoCapabilityResponse {
            remote: PairingPolicy {
                io_capability: IoCapability::DisplayYesNo,
                mitm_protection: true,
                oob_data_present: false,
            },
        },
    }));
    stack.emit_gap(Some(GapEvent::Authentication {
        remote_device: gateway,
        event: AuthenticationEvent::UserConfirmationRequest {
            numeric_value: 123_456,
        },
    }));
    stack.emit_hfre(Some(HfreEvent::OpenPortIndication {
        port_id: PortId(1),
        remote_device: gateway,
    }));
    stack.emit_hfre(Some(HfreEvent::OpenServiceLevelConnectionIndication {
        port_id: PortId(1),
        remote_supported_features: Some(0x3EF),
        remote_call_hold_multiparty_support: 0,
    }));
    stack.emit_hfre(Some(HfreEvent::CodecSelectRequestIndication {
        port_id: PortId(1),
        codec_id: CodecId::MSBC_ID,
    }));
    stack.emit_hfre(Some(HfreEvent::RingIndication { port_id: PortId(1) }));
    let handled = shell.pump_events();
    println!("\n{} events handled", handled);

    for line in ["AnswerCall", "ManageAudio 1", "HangUpCall", "CloseHFServer", "Quit"] {
        println!("{}", line);
        shell.process_line(line);
        if shell.exit_requested() {
            break;
        }
    }

    shell.session_mut().close_stack()?;
    println!();
    for call in shell.session().stack().calls() {
        println!("  {}", call.name());
    }
    Ok(())
}
