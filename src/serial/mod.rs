//! # Serial Port Collaborator
//!
//! Thin wrappers around `serialport`: enumerate devices, prompt for one,
//! open it with the resolved framing. The bytes themselves are pumped by
//! [`reader::SerialReader`] on a background thread.

pub mod reader;

use log::info;
use std::io::{BufRead, Write};
use std::time::Duration;

use serialport::{DataBits, SerialPort, StopBits};

use crate::core::config::SerialSettings;
use crate::error::SermonError;

pub use reader::{SerialEvent, SerialReader};

/// Names of the ports the OS reports, sorted.
pub fn list_devices() -> Result<Vec<String>, SermonError> {
    let mut names: Vec<String> = serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}

/// Print the numbered device list and read a 1-based choice.
pub fn select_device<R: BufRead, W: Write>(
    devices: &[String],
    mut input: R,
    mut output: W,
) -> Result<String, SermonError> {
    if devices.is_empty() {
        return Err(SermonError::NoDevices);
    }

    writeln!(output)?;
    for (i, device) in devices.iter().enumerate() {
        writeln!(output, "\t{}. {}", i + 1, device)?;
    }
    writeln!(output)?;
    write!(output, "Select device [1-{}]: ", devices.len())?;
    output.flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;
    let response = response.trim();

    match response.parse::<usize>() {
        Ok(n) if (1..=devices.len()).contains(&n) => Ok(devices[n - 1].clone()),
        _ => Err(SermonError::InvalidSelection(response.to_string())),
    }
}

fn data_bits(bits: u8) -> DataBits {
    match bits {
        5 => DataBits::Five,
        6 => DataBits::Six,
        7 => DataBits::Seven,
        _ => DataBits::Eight,
    }
}

fn stop_bits(bits: u8) -> StopBits {
    match bits {
        2 => StopBits::Two,
        _ => StopBits::One,
    }
}

/// Open the device. The read timeout bounds how long the reader thread
/// can go without noticing a shutdown request.
pub fn open(settings: &SerialSettings) -> Result<Box<dyn SerialPort>, SermonError> {
    info!(
        "Opening {} at {} baud ({}N{})",
        settings.device, settings.baud, settings.data_bits, settings.stop_bits
    );
    let port = serialport::new(settings.device.as_str(), settings.baud)
        .data_bits(data_bits(settings.data_bits))
        .stop_bits(stop_bits(settings.stop_bits))
        .timeout(Duration::from_millis(settings.read_timeout_ms))
        .open()?;
    Ok(port)
}
