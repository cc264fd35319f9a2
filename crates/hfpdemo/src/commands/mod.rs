//! Console command handlers
//!
//! Each handler checks that the stack is open, validates its parameters
//! against the command's usage, then issues the matching stack call(s).
//! A usage failure prints the usage line and touches nothing else.

mod gap;
mod hfre;

#[cfg(test)]
mod tests;

use crate::error::{RegistryError, ShellError};
use crate::session::Session;
use crate::shell::{CommandRegistry, Parameter};
use crate::stack::BluetoothStack;

const HELP_BANNER: &[&str] = &[
    "******************************************************************",
    "* Command Options: Inquiry, DisplayInquiryList, Pair,            *",
    "*                  EndPairing, PINCodeResponse, PassKeyResponse, *",
    "*                  UserConfirmationResponse,                     *",
    "*                  SetDiscoverabilityMode, SetConnectabilityMode,*",
    "*                  SetPairabilityMode,                           *",
    "*                  ChangeSimplePairingParameters,                *",
    "*                  GetLocalAddress, GetLocalName, SetLocalName,  *",
    "*                  GetClassOfDevice, SetClassOfDevice,           *",
    "*                  GetRemoteName, OpenHFServer, CloseHFServer    *",
    "*                  ManageAudio, AnswerCall, HangUpCall, Close,   *",
    "*                  Help, Quit                                    *",
    "******************************************************************",
];

/// Register every console command, in lookup order
pub fn register_all<S: BluetoothStack>(
    registry: &mut CommandRegistry<S>,
) -> Result<(), RegistryError> {
    registry.register("INQUIRY", gap::inquiry)?;
    registry.register("DISPLAYINQUIRYLIST", gap::display_inquiry_list)?;
    registry.register("PAIR", gap::pair)?;
    registry.register("ENDPAIRING", gap::end_pairing)?;
    registry.register("PINCODERESPONSE", gap::pin_code_response)?;
    registry.register("PASSKEYRESPONSE", gap::passkey_response)?;
    registry.register("USERCONFIRMATIONRESPONSE", gap::user_confirmation_response)?;
    registry.register("SETDISCOVERABILITYMODE", gap::set_discoverability_mode)?;
    registry.register("SETCONNECTABILITYMODE", gap::set_connectability_mode)?;
    registry.register("SETPAIRABILITYMODE", gap::set_pairability_mode)?;
    registry.register(
        "CHANGESIMPLEPAIRINGPARAMETERS",
        gap::change_simple_pairing_parameters,
    )?;
    registry.register("GETLOCALADDRESS", gap::get_local_address)?;
    registry.register("SETLOCALNAME", gap::set_local_name)?;
    registry.register("GETLOCALNAME", gap::get_local_name)?;
    registry.register("SETCLASSOFDEVICE", gap::set_class_of_device)?;
    registry.register("GETCLASSOFDEVICE", gap::get_class_of_device)?;
    registry.register("GETREMOTENAME", gap::get_remote_name)?;
    registry.register("OPENHFSERVER", hfre::open_hf_server)?;
    // Must precede CLOSE, which is its prefix
    registry.register("CLOSEHFSERVER", hfre::close_hf_server)?;
    registry.register("CLOSE", hfre::close_port)?;
    registry.register("MANAGEAUDIO", hfre::manage_audio)?;
    registry.register("ANSWERCALL", hfre::answer_call)?;
    registry.register("HANGUPCALL", hfre::hang_up_call)?;
    registry.register("HELP", help)?;
    Ok(())
}

/// Print the command banner
pub fn display_help<S: BluetoothStack>(session: &mut Session<S>) {
    for line in HELP_BANNER {
        session.display(*line);
    }
}

fn help<S: BluetoothStack>(session: &mut Session<S>, _: &[Parameter]) -> Result<(), ShellError> {
    display_help(session);
    Ok(())
}

/// Strict numeric value of the parameter at `index`
fn number(parameters: &[Parameter], index: usize) -> Option<u32> {
    parameters.get(index).and_then(Parameter::number)
}

/// Print `text` and fail with `InvalidParameters`
fn usage<S: BluetoothStack>(session: &mut Session<S>, text: &str) -> ShellError {
    session.display(text);
    ShellError::InvalidParameters
}
