//! Hands-free server, audio and call control commands

use super::{number, usage};
use crate::error::ShellError;
use crate::gap::{COD_MAJOR_AUDIO_VIDEO, COD_MINOR_AUDIO_VIDEO_HANDS_FREE};
use crate::hfre::{HandsFreeFeatures, PortId};
use crate::session::Session;
use crate::shell::Parameter;
use crate::stack::BluetoothStack;
use log::{debug, info, warn};

const OPEN_SERVER_USAGE: &str = "Usage: OpenHFServer [Port Number]";
const MANAGE_AUDIO_USAGE: &str = "Usage: ManageAudio [Release = 0, Setup = 1].";

/// The open server port, or a `FunctionError` after printing
/// `"<action>: Invalid Port ID."`
fn require_port<S: BluetoothStack>(
    session: &mut Session<S>,
    action: &str,
) -> Result<PortId, ShellError> {
    match session.server_port {
        Some(port_id) => Ok(port_id),
        None => {
            session.display(format!("{}: Invalid Port ID.", action));
            Err(ShellError::FunctionError)
        }
    }
}

pub(super) fn open_hf_server<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    if session.server_port.is_some() {
        session.display("Server already open.");
        return Err(ShellError::FunctionError);
    }
    let server_port = match number(parameters, 0).filter(|&port| port != 0) {
        Some(port) => port,
        None => return Err(usage(session, OPEN_SERVER_USAGE)),
    };

    let port_id = match session
        .stack
        .open_handsfree_server(server_port, HandsFreeFeatures::supported())
    {
        Ok(port_id) => port_id,
        Err(e) => {
            session.display(format!(
                "Unable to Open Server on: {}, Error = {}.",
                server_port, e.status
            ));
            return Err(ShellError::UnableToRegisterServer);
        }
    };
    session.server_port = Some(port_id);
    info!("hands-free server open on port {} ({})", server_port, port_id);
    session.display("Open HandsFree Server Port: Function Successful.");

    advertise_hands_free(session);

    let service_name = format!("HandsFree Port {}", server_port);
    match session
        .stack
        .register_handsfree_sdp_record(port_id, &service_name)
    {
        Ok(handle) => {
            session.sdp_handle = Some(handle);
            session.display("Register HandsFree SDP Record: Function Successful.");
            Ok(())
        }
        Err(e) => {
            session.display(format!(
                "Register HandsFree SDP Record: Function Failure. {}",
                e.status
            ));
            match session.stack.close_server_port(port_id) {
                Ok(()) => session.display("Close Server Port: Function Successful."),
                Err(close) => {
                    session.display(format!("Close Server Port Failure: {}.", close.status))
                }
            }
            session.server_port = None;
            session.sdp_handle = None;
            Err(ShellError::stack("register_handsfree_sdp_record", e))
        }
    }
}

/// Rewrite the class of device as an Audio/Video hands-free unit
fn advertise_hands_free<S: BluetoothStack>(session: &mut Session<S>) {
    let mut class_of_device = match session.stack.class_of_device() {
        Ok(class_of_device) => class_of_device,
        Err(e) => {
            debug!("class of device unavailable: {}", e);
            return;
        }
    };
    class_of_device.set_major_device_class(COD_MAJOR_AUDIO_VIDEO);
    class_of_device.set_minor_device_class(COD_MINOR_AUDIO_VIDEO_HANDS_FREE);
    if let Err(e) = session.stack.set_class_of_device(class_of_device) {
        warn!("class of device not updated: {}", e);
    }
}

pub(super) fn close_hf_server<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let port_id = match session.server_port {
        Some(port_id) => port_id,
        None => {
            session.display("NO Server open.");
            return Err(ShellError::InvalidParameters);
        }
    };

    if let Some(handle) = session.sdp_handle.take() {
        if let Err(e) = session.stack.unregister_sdp_record(port_id, handle) {
            warn!("SDP record {:?} not removed: {}", handle, e);
        }
    }

    session
        .stack
        .close_server_port(port_id)
        .map_err(|e| ShellError::stack("close_server_port", e))?;
    session.server_port = None;
    info!("hands-free server {} closed", port_id);
    session.display("Server Closed.");
    Ok(())
}

pub(super) fn close_port<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let port_id = match session.server_port {
        Some(port_id) => port_id,
        None => {
            session.display("Invalid Port ID: no hands-free port open.");
            return Err(ShellError::InvalidParameters);
        }
    };

    session
        .stack
        .close_port(port_id)
        .map_err(|e| ShellError::stack("close_port", e))?;
    session.display("Close Port: Function Successful.");
    Ok(())
}

pub(super) fn manage_audio<S: BluetoothStack>(
    session: &mut Session<S>,
    parameters: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let setup = match number(parameters, 0) {
        Some(value) => value != 0,
        None => return Err(usage(session, MANAGE_AUDIO_USAGE)),
    };

    if setup {
        let port_id = require_port(session, "Setup Audio Connection")?;
        session
            .stack
            .setup_audio_connection(port_id)
            .map_err(|e| ShellError::stack("setup_audio_connection", e))?;
        session.display("Setup Audio Connection: Function Successful.");
    } else {
        let port_id = require_port(session, "Release Audio Connection")?;
        session
            .stack
            .release_audio_connection(port_id)
            .map_err(|e| ShellError::stack("release_audio_connection", e))?;
        session.display("Release Audio Connection: Function Successful.");
    }
    Ok(())
}

pub(super) fn answer_call<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let port_id = require_port(session, "Answer Incoming Call")?;
    session
        .stack
        .answer_incoming_call(port_id)
        .map_err(|e| ShellError::stack("answer_incoming_call", e))?;
    session.display("Answer Incoming Call: Function Successful.");
    Ok(())
}

pub(super) fn hang_up_call<S: BluetoothStack>(
    session: &mut Session<S>,
    _: &[Parameter],
) -> Result<(), ShellError> {
    session.require_stack()?;
    let port_id = require_port(session, "Hang Up Call")?;
    session
        .stack
        .hang_up_call(port_id)
        .map_err(|e| ShellError::stack("hang_up_call", e))?;
    session.display("Hang Up Call: Function Successful.");
    Ok(())
}
