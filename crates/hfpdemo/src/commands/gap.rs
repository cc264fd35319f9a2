//! Discovery, pairing and local device commands

use super::{number, usage};
use crate::error::ShellError;
use crate::gap::{
    AuthenticationResponse, BdAddr, BondingType, ClassOfDevice, ConnectabilityMode,
    DiscoverabilityMode, InquiryParameters, IoCapability, PairabilityMode, PinCode,
    MAX_PASSKEY_DIGITS, MAX_PASSKEY_VALUE,
};
use crate::session::Session;
use crate::shell::Parameter;
use crate::stack::BluetoothStack;
use log::{debug, info};

const PAIR_USAGE: &str =
    "Usage: Pair [Inquiry Index] [Bonding Type (0 = Dedicated, 1 = General) (optional).";
const END_PAIRING_USAGE: &str = "Usage: EndPairing [Inquiry Index].";
const PIN_CODE_USAGE: &str = "Usage: PINCodeResponse [PIN Code].";
const PASSKEY_USAGE: &str = "Usage: PassKeyResponse [Numeric Passkey (0 - 999999)].";
const USER_CONFIRMATION_USAGE: &str =
    "Usage: UserConfirmationResponse [Confirmation (0 = No, 1 = Yes)].";
const DISCOVERABILITY_USAGE: &str = "Usage: SetDiscoverabilityMode [Mode (0 = Non Discoverable, 1 = Limited Discoverable, 2 = General Discoverable)].";
const CONNECTABILITY_USAGE: &str =
    "Usage: SetConnectabilityMode [Mode (0 = Non Connectable, 1 = Connectable)].";
const PAIRABILITY_USAGE: &str = "Usage: SetPairabilityMode [Mode (0 = Non Pairable, 1 = Pairable, 2 = Pairable (Secure Simple Pairing)].";
const SIMPLE_PAIRING_USAGE: &str = "Usage: ChangeSimplePairingParameters [I/O Capability (0 = Display Only, 1 = Display Yes/No, 2 = Keyboard Only, 3 = No Input/Output)] [MITM Requirement (0 = No, 1 = Yes)].";
const SET_LOCAL_NAME_USAGE: &str = "Usage: SetLocalName [Local Name (no spaces allowed)].";
const SET_CLASS_OF_DEVICE_USAGE: &str = "Usage: SetClassOfDevice [Class of Device].";
const GET_REMOTE_NAME_USAGE: &str = "Usage: GetRemoteName [Inquiry Index].";

/// Device picked by the 1-based inquiry index in the first parameter
fn selected_device<S: BluetoothStack>(
    session: &Session<S>,
    parameters: &[Parameter],
) -> Option<BdAddr> {
    number(parameters, 0).and_then(|index| session.inquiry.select(index))
}

/// The remote device with an outstanding authentication challenge
fn pending_remote<S: BluetoothStack>(
    session: &mut Session<S>,
    response: &str,
) -> Result<BdAddr, ShellError> {
    match session.pending_auth {
        Some(remote) => Ok(remote),
        None => {
            session.display(format!(
                "Unable to issue {} Authentication Response: Authentication is not currently in progress.",
                response
            ));
            Err(ShellError::FunctionError)
        }
    }
}

/// Send an authentication response and end the exchange, whatever the
/// outcome of the call.
fn answer_challenge<S: BluetoothStack>(
    session: &mut Session<S>,
    remote: BdAddr,
    response: AuthenticationResponse,
    label: &str,
) -> Result<(), ShellError> {
    let result = session.stack.authentication_response(remote, &response);
    session.pending_auth = None;
    result.map_err(|e| ShellError::stack("authentication_response", e))?;
    session.display(format!("Authentication Response, {} Response Success.", label));
    Ok(())
}

pub(super) fn inquiry<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    session
        .stack
        .perform_inquiry(InquiryParameters::default())
        .map_err(|e| ShellError::stack("perform_inquiry", e))?;
    session.inquiry.reset();
    session.display("Perform Inquiry: Function Successful.");
    Ok(())
}

pub(super) fn display_inquiry_list<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let devices: Vec<BdAddr> = session.inquiry.iter().copied().collect();
    session.display(format!(
        "Inquiry List: {} Devices{}",
        devices.len(),
        if devices.is_empty() { "." } else { ":" }
    ));
    for (index, address) in devices.iter().enumerate() {
        session.display(format!(" Inquiry Result: {}, {}.", index + 1, address));
    }
    Ok(())
}

pub(super) fn pair<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    if session.connected.is_some() {
        session.display("The Pair command can only be issued when not already connected.");
        return Err(ShellError::FunctionError);
    }

    let remote = match selected_device(session, parameters) {
        Some(remote) => remote,
        None => return Err(usage(session, PAIR_USAGE)),
    };
    let bonding_type = match parameters.get(1) {
        None => BondingType::Dedicated,
        Some(parameter) => match parameter.number() {
            Some(0) => BondingType::Dedicated,
            Some(_) => BondingType::General,
            None => return Err(usage(session, PAIR_USAGE)),
        },
    };

    // Force a fresh key exchange
    session.delete_link_key(Some(remote));
    session
        .stack
        .initiate_bonding(remote, bonding_type)
        .map_err(|e| ShellError::stack("initiate_bonding", e))?;
    info!("{} bonding started with {}", bonding_type, remote);
    session.display(format!(
        "Initiate Bonding ({}): Function Successful.",
        bonding_type
    ));
    Ok(())
}

pub(super) fn end_pairing<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let remote = match selected_device(session, parameters) {
        Some(remote) => remote,
        None => return Err(usage(session, END_PAIRING_USAGE)),
    };

    session
        .stack
        .end_bonding(remote)
        .map_err(|e| ShellError::stack("end_bonding", e))?;
    session.pending_auth = None;
    session.display("End Bonding: Function Successful.");
    Ok(())
}

pub(super) fn pin_code_response<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let remote = pending_remote(session, "PIN Code")?;
    let pin = match parameters.first().and_then(|p| PinCode::new(p.text())) {
        Some(pin) => pin,
        None => return Err(usage(session, PIN_CODE_USAGE)),
    };

    answer_challenge(session, remote, AuthenticationResponse::PinCode(pin), "Pin Code")
}

pub(super) fn passkey_response<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let remote = pending_remote(session, "Pass Key")?;
    let passkey = parameters
        .first()
        .filter(|p| p.text().len() <= MAX_PASSKEY_DIGITS)
        .and_then(Parameter::number)
        .filter(|&value| value <= MAX_PASSKEY_VALUE);
    let passkey = match passkey {
        Some(passkey) => passkey,
        None => return Err(usage(session, PASSKEY_USAGE)),
    };

    answer_challenge(session, remote, AuthenticationResponse::Passkey(passkey), "Passkey")
}

pub(super) fn user_confirmation_response<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let remote = pending_remote(session, "User Confirmation")?;
    let accept = match number(parameters, 0) {
        Some(value) => value != 0,
        None => return Err(usage(session, USER_CONFIRMATION_USAGE)),
    };

    answer_challenge(
        session,
        remote,
        AuthenticationResponse::UserConfirmation(accept),
        "User Confirmation",
    )
}

pub(super) fn set_discoverability_mode<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let mode = match number(parameters, 0).and_then(DiscoverabilityMode::from_u32) {
        Some(mode) => mode,
        None => return Err(usage(session, DISCOVERABILITY_USAGE)),
    };

    session
        .stack
        .set_discoverability_mode(mode, mode.timeout())
        .map_err(|e| ShellError::stack("set_discoverability_mode", e))?;
    session.display(format!(
        "Discoverability Mode successfully set to: {} Discoverable.",
        mode
    ));
    Ok(())
}

pub(super) fn set_connectability_mode<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let mode = match number(parameters, 0).and_then(ConnectabilityMode::from_u32) {
        Some(mode) => mode,
        None => return Err(usage(session, CONNECTABILITY_USAGE)),
    };

    session
        .stack
        .set_connectability_mode(mode)
        .map_err(|e| ShellError::stack("set_connectability_mode", e))?;
    session.display(format!("Connectability Mode successfully set to: {}.", mode));
    Ok(())
}

pub(super) fn set_pairability_mode<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let mode = match number(parameters, 0).and_then(PairabilityMode::from_u32) {
        Some(mode) => mode,
        None => return Err(usage(session, PAIRABILITY_USAGE)),
    };

    session
        .stack
        .set_pairability_mode(mode)
        .map_err(|e| ShellError::stack("set_pairability_mode", e))?;
    session.display(format!("Pairability Mode successfully set to: {}.", mode));
    if mode == PairabilityMode::PairableSecureSimplePairing {
        display_pairing_policy(session);
    }
    Ok(())
}

pub(super) fn change_simple_pairing_parameters<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let io_capability = number(parameters, 0)
        .and_then(|value| u8::try_from(value).ok())
        .and_then(IoCapability::from_u8);
    let (io_capability, mitm) = match (io_capability, number(parameters, 1)) {
        (Some(io_capability), Some(mitm)) => (io_capability, mitm != 0),
        _ => return Err(usage(session, SIMPLE_PAIRING_USAGE)),
    };

    session.pairing_policy.io_capability = io_capability;
    session.pairing_policy.mitm_protection = mitm;
    debug!("pairing policy now {:?}", session.pairing_policy);
    display_pairing_policy(session);
    Ok(())
}

fn display_pairing_policy<S: BluetoothStack>(session: &mut Session<S>) {
    let policy = session.pairing_policy;
    session.display(format!(
        "Current I/O Capabilities: {}, MITM Protection: {}.",
        policy.io_capability,
        if policy.mitm_protection { "TRUE" } else { "FALSE" }
    ));
}

pub(super) fn get_local_address<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let address = session
        .stack
        .local_address()
        .map_err(|e| ShellError::stack("local_address", e))?;
    session.display(format!("BD_ADDR of Local Device is: {}.", address));
    Ok(())
}

pub(super) fn set_local_name<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let name = match parameters.first() {
        Some(parameter) => parameter.text().to_string(),
        None => return Err(usage(session, SET_LOCAL_NAME_USAGE)),
    };

    session
        .stack
        .set_local_name(&name)
        .map_err(|e| ShellError::stack("set_local_name", e))?;
    session.display(format!("Local Device Name set to: {}.", name));
    Ok(())
}

pub(super) fn get_local_name<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let name = session
        .stack
        .local_name()
        .map_err(|e| ShellError::stack("local_name", e))?;
    session.display(format!("Name of Local Device is: {}.", name));
    Ok(())
}

pub(super) fn set_class_of_device<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let class_of_device = match number(parameters, 0) {
        Some(value) => ClassOfDevice::new(value),
        None => return Err(usage(session, SET_CLASS_OF_DEVICE_USAGE)),
    };

    session
        .stack
        .set_class_of_device(class_of_device)
        .map_err(|e| ShellError::stack("set_class_of_device", e))?;
    session.display(format!("Set Class of Device to {}.", class_of_device));
    Ok(())
}

pub(super) fn get_class_of_device<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let class_of_device = session
        .stack
        .class_of_device()
        .map_err(|e| ShellError::stack("class_of_device", e))?;
    session.display(format!("Local Class of Device is: {}.", class_of_device));
    Ok(())
}

pub(super) fn get_remote_name<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let remote = match selected_device(session, parameters) {
        Some(remote) => remote,
        None => return Err(usage(session, GET_REMOTE_NAME_USAGE)),
    };

    session
        .stack
        .query_remote_name(remote)
        .map_err(|e| ShellError::stack("query_remote_name", e))?;
    session.display("Query Remote Device Name: Function Successful.");
    Ok(())
}
