//! Unit tests for the command handlers

use super::*;
use crate::config::{HciDriverConfig, PlatformConfig};
use crate::console::BufferConsole;
use crate::gap::{
    AuthenticationResponse, BdAddr, BondingType, ConnectabilityMode,
    DiscoverabilityMode, IoCapability, PairabilityMode, PinCode,
};
use crate::hfre::{HandsFreeFeatures, PortId, SdpHandle};
use crate::stack::{event_channel, EventReceiver, RecordingStack, StackCall};

const GATEWAY: BdAddr = BdAddr {
    bytes: [0x01, 0x02, 0x03, 0x04, 0x05, 0x06],
};
const HEADSET: BdAddr = BdAddr {
    bytes: [0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F],
};

fn open_session() -> (Session<RecordingStack>, BufferConsole, EventReceiver) {
    let console = BufferConsole::new();
    let (tx, rx) = event_channel();
    let mut session = Session::new(RecordingStack::new(), Box::new(console.clone()), tx);
    session
        .open_stack(&HciDriverConfig::Usb, &PlatformConfig::default())
        .unwrap();
    session.stack_mut().clear_calls();
    console.clear();
    (session, console, rx)
}

fn closed_session() -> (Session<RecordingStack>, BufferConsole) {
    let console = BufferConsole::new();
    let (tx, _rx) = event_channel();
    let session = Session::new(RecordingStack::new(), Box::new(console.clone()), tx);
    (session, console)
}

fn params(texts: &[&str]) -> Vec<Parameter> {
    texts.iter().map(|t| Parameter::new(t)).collect()
}

fn with_server(session: &mut Session<RecordingStack>) {
    hfre::open_hf_server(session, &params(&["3"])).unwrap();
    session.stack_mut().clear_calls();
}

#[test]
fn test_register_all_fits_the_table() {
    let mut registry = CommandRegistry::<RecordingStack>::new(crate::config::MAX_SUPPORTED_COMMANDS);
    register_all(&mut registry).unwrap();
    assert_eq!(registry.len(), 24);

    let names: Vec<_> = registry.names().collect();
    let hf_server = names.iter().position(|n| *n == "CLOSEHFSERVER").unwrap();
    let close = names.iter().position(|n| *n == "CLOSE").unwrap();
    assert!(hf_server < close);
}

#[test]
fn test_register_all_reports_a_full_table() {
    let mut registry = CommandRegistry::<RecordingStack>::new(4);
    assert!(register_all(&mut registry).is_err());
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_handlers_require_an_open_stack() {
    let (mut session, _console) = closed_session();
    assert_eq!(
        gap::inquiry(&mut session, &[]),
        Err(ShellError::InvalidStackId)
    );
    assert_eq!(
        hfre::open_hf_server(&mut session, &params(&["1"])),
        Err(ShellError::InvalidStackId)
    );
    assert_eq!(
        gap::get_local_address(&mut session, &[]),
        Err(ShellError::InvalidStackId)
    );
    assert!(session.stack().calls().is_empty());
}

#[test]
fn test_help_prints_the_banner() {
    let (mut session, console, _rx) = open_session();
    help(&mut session, &[]).unwrap();
    assert_eq!(console.lines().len(), HELP_BANNER.len());
    assert!(console.contains("OpenHFServer"));
}

#[test]
fn test_inquiry_resets_the_list() {
    let (mut session, console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY]);

    gap::inquiry(&mut session, &[]).unwrap();
    assert!(session.inquiry().is_empty());
    assert!(session.stack().called("perform_inquiry"));
    assert!(console.contains("Perform Inquiry: Function Successful."));
}

#[test]
fn test_inquiry_failure_keeps_the_list() {
    let (mut session, _console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY]);
    session.stack_mut().fail("perform_inquiry", -20);

    let err = gap::inquiry(&mut session, &[]).unwrap_err();
    assert_eq!(
        err,
        ShellError::Stack {
            function: "perform_inquiry",
            status: -20
        }
    );
    assert_eq!(session.inquiry().len(), 1);
}

#[test]
fn test_display_inquiry_list() {
    let (mut session, console, _rx) = open_session();
    gap::display_inquiry_list(&mut session, &[]).unwrap();
    assert!(console.contains("Inquiry List: 0 Devices."));

    console.clear();
    session.inquiry.replace(&[GATEWAY, HEADSET]);
    gap::display_inquiry_list(&mut session, &[]).unwrap();
    let lines = console.lines();
    assert_eq!(lines[0], "Inquiry List: 2 Devices:");
    assert_eq!(lines[1], format!(" Inquiry Result: 1, {}.", GATEWAY));
    assert_eq!(lines[2], format!(" Inquiry Result: 2, {}.", HEADSET));
}

#[test]
fn test_pair_purges_link_key_before_bonding() {
    let (mut session, console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY, HEADSET]);

    gap::pair(&mut session, &params(&["2", "1"])).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[
            StackCall::DeleteStoredLinkKeys(Some(HEADSET)),
            StackCall::InitiateBonding(HEADSET, BondingType::General),
        ]
    );
    assert!(console.contains("Initiate Bonding (General): Function Successful."));
}

#[test]
fn test_pair_defaults_to_dedicated_bonding() {
    let (mut session, _console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY]);

    gap::pair(&mut session, &params(&["1"])).unwrap();
    assert!(session
        .stack()
        .calls()
        .contains(&StackCall::InitiateBonding(GATEWAY, BondingType::Dedicated)));
}

#[test]
fn test_pair_rejects_bad_index() {
    let (mut session, console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY]);

    for bad in [&["0"][..], &["2"][..], &["x"][..], &[][..]] {
        assert_eq!(
            gap::pair(&mut session, &params(bad)),
            Err(ShellError::InvalidParameters)
        );
    }
    assert!(session.stack().calls().is_empty());
    assert!(console.contains("Usage: Pair"));
}

#[test]
fn test_pair_refused_while_connected() {
    let (mut session, console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY]);
    session.connected = Some(GATEWAY);

    assert_eq!(
        gap::pair(&mut session, &params(&["1"])),
        Err(ShellError::FunctionError)
    );
    assert!(session.stack().calls().is_empty());
    assert!(console.contains("can only be issued when not already connected"));
}

#[test]
fn test_end_pairing_clears_pending_authentication() {
    let (mut session, _console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY]);
    session.pending_auth = Some(GATEWAY);

    gap::end_pairing(&mut session, &params(&["1"])).unwrap();
    assert_eq!(session.stack().calls(), &[StackCall::EndBonding(GATEWAY)]);
    assert_eq!(session.pending_auth(), None);
}

#[test]
fn test_pin_code_response_without_pending_authentication() {
    let (mut session, console, _rx) = open_session();
    assert_eq!(
        gap::pin_code_response(&mut session, &params(&["0000"])),
        Err(ShellError::FunctionError)
    );
    assert!(session.stack().calls().is_empty());
    assert!(console.contains("Authentication is not currently in progress"));
}

#[test]
fn test_pin_code_response_answers_and_clears() {
    let (mut session, console, _rx) = open_session();
    session.pending_auth = Some(GATEWAY);

    gap::pin_code_response(&mut session, &params(&["1234"])).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[StackCall::AuthenticationResponse(
            GATEWAY,
            AuthenticationResponse::PinCode(PinCode::new("1234").unwrap())
        )]
    );
    assert_eq!(session.pending_auth(), None);
    assert!(console.contains("Pin Code Response Success."));
}

#[test]
fn test_pin_code_response_rejects_long_pin() {
    let (mut session, _console, _rx) = open_session();
    session.pending_auth = Some(GATEWAY);

    assert_eq!(
        gap::pin_code_response(&mut session, &params(&["12345678901234567"])),
        Err(ShellError::InvalidParameters)
    );
    assert_eq!(session.pending_auth(), Some(GATEWAY));
}

#[test]
fn test_failed_response_still_ends_the_exchange() {
    let (mut session, _console, _rx) = open_session();
    session.pending_auth = Some(GATEWAY);
    session.stack_mut().fail("authentication_response", -1);

    assert!(gap::user_confirmation_response(&mut session, &params(&["1"])).is_err());
    assert_eq!(session.pending_auth(), None);
}

#[test]
fn test_passkey_response_bounds() {
    let (mut session, _console, _rx) = open_session();
    session.pending_auth = Some(GATEWAY);

    for bad in ["1000000", "0999999x", "abc"] {
        assert_eq!(
            gap::passkey_response(&mut session, &params(&[bad])),
            Err(ShellError::InvalidParameters)
        );
    }
    assert!(session.stack().calls().is_empty());

    gap::passkey_response(&mut session, &params(&["999999"])).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[StackCall::AuthenticationResponse(
            GATEWAY,
            AuthenticationResponse::Passkey(999_999)
        )]
    );
}

#[test]
fn test_user_confirmation_response_rejects() {
    let (mut session, _console, _rx) = open_session();
    session.pending_auth = Some(GATEWAY);

    gap::user_confirmation_response(&mut session, &params(&["0"])).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[StackCall::AuthenticationResponse(
            GATEWAY,
            AuthenticationResponse::UserConfirmation(false)
        )]
    );
}

#[test]
fn test_mode_setters_reject_out_of_range() {
    let (mut session, _console, _rx) = open_session();
    assert_eq!(
        gap::set_discoverability_mode(&mut session, &params(&["3"])),
        Err(ShellError::InvalidParameters)
    );
    assert_eq!(
        gap::set_connectability_mode(&mut session, &params(&["2"])),
        Err(ShellError::InvalidParameters)
    );
    assert_eq!(
        gap::set_pairability_mode(&mut session, &params(&["3"])),
        Err(ShellError::InvalidParameters)
    );
    assert_eq!(
        gap::set_pairability_mode(&mut session, &[]),
        Err(ShellError::InvalidParameters)
    );
    assert!(session.stack().calls().is_empty());
}

#[test]
fn test_limited_discoverability_uses_timeout() {
    let (mut session, console, _rx) = open_session();
    gap::set_discoverability_mode(&mut session, &params(&["1"])).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[StackCall::SetDiscoverabilityMode(
            DiscoverabilityMode::LimitedDiscoverable,
            crate::gap::LIMITED_DISCOVERABLE_TIMEOUT_SECS
        )]
    );
    assert!(console.contains("Discoverability Mode successfully set to"));
}

#[test]
fn test_connectability_and_pairability_modes() {
    let (mut session, console, _rx) = open_session();
    gap::set_connectability_mode(&mut session, &params(&["0"])).unwrap();
    gap::set_pairability_mode(&mut session, &params(&["2"])).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[
            StackCall::SetConnectabilityMode(ConnectabilityMode::NonConnectable),
            StackCall::SetPairabilityMode(PairabilityMode::PairableSecureSimplePairing),
        ]
    );
    assert!(console.contains("Current I/O Capabilities: No Input/Output, MITM Protection: FALSE."));
}

#[test]
fn test_change_simple_pairing_parameters() {
    let (mut session, console, _rx) = open_session();
    gap::change_simple_pairing_parameters(&mut session, &params(&["1", "1"])).unwrap();
    assert_eq!(session.pairing_policy().io_capability, IoCapability::DisplayYesNo);
    assert!(session.pairing_policy().mitm_protection);
    assert!(console.contains("Current I/O Capabilities: Display Yes/No, MITM Protection: TRUE."));

    assert_eq!(
        gap::change_simple_pairing_parameters(&mut session, &params(&["4", "0"])),
        Err(ShellError::InvalidParameters)
    );
    assert_eq!(
        gap::change_simple_pairing_parameters(&mut session, &params(&["0"])),
        Err(ShellError::InvalidParameters)
    );
    assert_eq!(session.pairing_policy().io_capability, IoCapability::DisplayYesNo);
    assert!(session.stack().calls().is_empty());
}

#[test]
fn test_local_device_queries() {
    let (mut session, console, _rx) = open_session();
    gap::get_local_address(&mut session, &[]).unwrap();
    assert!(console.contains("BD_ADDR of Local Device is: 0x112233445566."));

    gap::set_local_name(&mut session, &params(&["Kitchen"])).unwrap();
    gap::get_local_name(&mut session, &[]).unwrap();
    assert!(console.contains("Name of Local Device is: Kitchen."));

    gap::set_class_of_device(&mut session, &params(&["0x200404"])).unwrap();
    gap::get_class_of_device(&mut session, &[]).unwrap();
    assert!(console.contains("Set Class of Device to 0x200404."));
    assert!(console.contains("Local Class of Device is: 0x200404."));
}

#[test]
fn test_set_class_of_device_requires_a_number() {
    let (mut session, _console, _rx) = open_session();
    assert_eq!(
        gap::set_class_of_device(&mut session, &params(&["audio"])),
        Err(ShellError::InvalidParameters)
    );
    assert!(session.stack().calls().is_empty());
}

#[test]
fn test_get_remote_name() {
    let (mut session, _console, _rx) = open_session();
    session.inquiry.replace(&[GATEWAY]);
    gap::get_remote_name(&mut session, &params(&["1"])).unwrap();
    assert_eq!(session.stack().calls(), &[StackCall::QueryRemoteName(GATEWAY)]);

    assert_eq!(
        gap::get_remote_name(&mut session, &params(&["5"])),
        Err(ShellError::InvalidParameters)
    );
}

#[test]
fn test_open_hf_server_registers_sdp_record() {
    let (mut session, console, _rx) = open_session();
    hfre::open_hf_server(&mut session, &params(&["3"])).unwrap();

    assert_eq!(session.server_port(), Some(PortId(1)));
    assert_eq!(session.sdp_handle(), Some(SdpHandle(0x0001_0000)));
    let calls = session.stack().calls();
    assert_eq!(
        calls[0],
        StackCall::OpenHandsFreeServer(3, HandsFreeFeatures::supported())
    );
    assert!(calls.contains(&StackCall::RegisterHandsFreeSdpRecord(
        PortId(1),
        "HandsFree Port 3".into()
    )));
    assert!(console.contains("Open HandsFree Server Port: Function Successful."));
}

#[test]
fn test_open_hf_server_advertises_hands_free_class() {
    let (mut session, _console, _rx) = open_session();
    hfre::open_hf_server(&mut session, &params(&["3"])).unwrap();

    let class_of_device = session
        .stack()
        .calls()
        .iter()
        .find_map(|call| match call {
            StackCall::SetClassOfDevice(cod) => Some(*cod),
            _ => None,
        })
        .unwrap();
    assert_eq!(class_of_device.major_device_class(), crate::gap::COD_MAJOR_AUDIO_VIDEO);
    assert_eq!(
        class_of_device.minor_device_class(),
        crate::gap::COD_MINOR_AUDIO_VIDEO_HANDS_FREE
    );
    // Service class bits survive
    assert_eq!(class_of_device.value() & 0xFF_E000, 0x40_0000);
}

#[test]
fn test_open_hf_server_usage_and_duplicates() {
    let (mut session, console, _rx) = open_session();
    for bad in [&["0"][..], &["port"][..], &[][..]] {
        assert_eq!(
            hfre::open_hf_server(&mut session, &params(bad)),
            Err(ShellError::InvalidParameters)
        );
    }
    assert!(session.stack().calls().is_empty());
    assert!(console.contains("Usage: OpenHFServer [Port Number]"));

    hfre::open_hf_server(&mut session, &params(&["3"])).unwrap();
    session.stack_mut().clear_calls();
    assert_eq!(
        hfre::open_hf_server(&mut session, &params(&["4"])),
        Err(ShellError::FunctionError)
    );
    assert!(session.stack().calls().is_empty());
    assert!(console.contains("Server already open."));
}

#[test]
fn test_open_hf_server_failure() {
    let (mut session, console, _rx) = open_session();
    session.stack_mut().fail("open_handsfree_server", -1001);
    assert_eq!(
        hfre::open_hf_server(&mut session, &params(&["3"])),
        Err(ShellError::UnableToRegisterServer)
    );
    assert_eq!(session.server_port(), None);
    assert!(console.contains("Unable to Open Server on: 3, Error = -1001."));
}

#[test]
fn test_open_hf_server_closes_port_when_sdp_fails() {
    let (mut session, console, _rx) = open_session();
    session.stack_mut().fail("register_handsfree_sdp_record", -5);

    let err = hfre::open_hf_server(&mut session, &params(&["3"])).unwrap_err();
    assert_eq!(
        err,
        ShellError::Stack {
            function: "register_handsfree_sdp_record",
            status: -5
        }
    );
    assert!(session
        .stack()
        .calls()
        .contains(&StackCall::CloseServerPort(PortId(1))));
    assert_eq!(session.server_port(), None);
    assert_eq!(session.sdp_handle(), None);
    assert!(console.contains("Close Server Port: Function Successful."));
}

#[test]
fn test_close_hf_server() {
    let (mut session, console, _rx) = open_session();
    assert_eq!(
        hfre::close_hf_server(&mut session, &[]),
        Err(ShellError::InvalidParameters)
    );
    assert!(console.contains("NO Server open."));

    with_server(&mut session);
    hfre::close_hf_server(&mut session, &[]).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[
            StackCall::UnregisterSdpRecord(PortId(1), SdpHandle(0x0001_0000)),
            StackCall::CloseServerPort(PortId(1)),
        ]
    );
    assert_eq!(session.server_port(), None);
    assert_eq!(session.sdp_handle(), None);
    assert!(console.contains("Server Closed."));
}

#[test]
fn test_close_hf_server_failure_keeps_port() {
    let (mut session, _console, _rx) = open_session();
    with_server(&mut session);
    session.stack_mut().fail("close_server_port", -2);

    assert!(hfre::close_hf_server(&mut session, &[]).is_err());
    assert_eq!(session.server_port(), Some(PortId(1)));
    assert_eq!(session.sdp_handle(), None);
}

#[test]
fn test_close_port() {
    let (mut session, console, _rx) = open_session();
    assert_eq!(
        hfre::close_port(&mut session, &[]),
        Err(ShellError::InvalidParameters)
    );

    with_server(&mut session);
    hfre::close_port(&mut session, &[]).unwrap();
    assert_eq!(session.stack().calls(), &[StackCall::ClosePort(PortId(1))]);
    assert_eq!(session.server_port(), Some(PortId(1)));
    assert!(console.contains("Close Port: Function Successful."));
}

#[test]
fn test_manage_audio() {
    let (mut session, console, _rx) = open_session();
    assert_eq!(
        hfre::manage_audio(&mut session, &[]),
        Err(ShellError::InvalidParameters)
    );
    assert!(console.contains("Usage: ManageAudio"));
    assert_eq!(
        hfre::manage_audio(&mut session, &params(&["1"])),
        Err(ShellError::FunctionError)
    );
    assert!(console.contains("Setup Audio Connection: Invalid Port ID."));

    with_server(&mut session);
    hfre::manage_audio(&mut session, &params(&["1"])).unwrap();
    hfre::manage_audio(&mut session, &params(&["0"])).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[
            StackCall::SetupAudioConnection(PortId(1)),
            StackCall::ReleaseAudioConnection(PortId(1)),
        ]
    );
}

#[test]
fn test_call_control_needs_a_port() {
    let (mut session, console, _rx) = open_session();
    assert_eq!(
        hfre::answer_call(&mut session, &[]),
        Err(ShellError::FunctionError)
    );
    assert_eq!(
        hfre::hang_up_call(&mut session, &[]),
        Err(ShellError::FunctionError)
    );
    assert!(console.contains("Answer Incoming Call: Invalid Port ID."));
    assert!(console.contains("Hang Up Call: Invalid Port ID."));
    assert!(session.stack().calls().is_empty());

    with_server(&mut session);
    hfre::answer_call(&mut session, &[]).unwrap();
    hfre::hang_up_call(&mut session, &[]).unwrap();
    assert_eq!(
        session.stack().calls(),
        &[
            StackCall::AnswerIncomingCall(PortId(1)),
            StackCall::HangUpCall(PortId(1)),
        ]
    );
}

#[test]
fn test_hang_up_failure_is_reported() {
    let (mut session, _console, _rx) = open_session();
    with_server(&mut session);
    session.stack_mut().fail("hang_up_call", -7);
    let err = hfre::hang_up_call(&mut session, &[]).unwrap_err();
    assert_eq!(err.to_string(), "hang_up_call() Failure: -7.");
    assert_eq!(err.code(), -4);
}

#[test]
fn test_class_of_device_fixup_is_best_effort() {
    let (mut session, _console, _rx) = open_session();
    session.stack_mut().fail("class_of_device", -1);
    hfre::open_hf_server(&mut session, &params(&["3"])).unwrap();
    assert!(!session.stack().called("set_class_of_device"));
    assert!(session.sdp_handle().is_some());
}
