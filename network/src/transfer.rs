use std::io::{Read, Write};
use std::net::TcpStream;

use bincode::error::{DecodeError, EncodeError};
use log::error;

use crate::TransferMetrics;

const HEADER_LENGTH: usize = 4;
const PLAIN: u8 = 0;
const SNAPPY: u8 = 1;

/// Reads frames of `[length: u32 BE][flag: u8][body]`, body is snap
/// compressed when flag says so.
pub struct SyncReceiver {
    pub reader: TcpStream,
    pub metrics: Option<TransferMetrics>,
}

impl SyncReceiver {
    pub fn receive<T: serde::de::DeserializeOwned>(&mut self) -> Option<(usize, T)> {
        let mut buffer = [0_u8; HEADER_LENGTH];
        if let Err(error) = self.reader.read_exact(&mut buffer) {
            error!("Unable to receive because of header read, {}", error);
            return None;
        }
        let length = u32::from_be_bytes(buffer) as usize;
        if length == 0 {
            error!("Unable to receive because of empty frame");
            return None;
        }
        let mut buffer = vec![0; length];
        if let Err(error) = self.reader.read_exact(buffer.as_mut_slice()) {
            error!("Unable to receive because of body read, {}", error);
            return None;
        }
        if let Some(metrics) = &self.metrics {
            metrics.received_bytes.inc_by((HEADER_LENGTH + length) as u64);
        }
        let body = match buffer[0] {
            PLAIN => buffer.split_off(1),
            SNAPPY => match snap::raw::Decoder::new().decompress_vec(&buffer[1..]) {
                Ok(body) => body,
                Err(error) => {
                    error!("Unable to receive because of decompression, {}", error);
                    return None;
                }
            },
            flag => {
                error!("Unable to receive because of unknown frame flag {}", flag);
                return None;
            }
        };
        match decode(&body) {
            Ok(response) => Some((HEADER_LENGTH + length, response)),
            Err(error) => {
                error!("Unable to receive because of deserialization, {}", error);
                None
            }
        }
    }
}

pub struct SyncSender {
    pub writer: TcpStream,
    pub compression: bool,
    pub metrics: Option<TransferMetrics>,
}

impl SyncSender {
    pub fn send_body(&mut self, body: Vec<u8>) -> Option<usize> {
        let mut frame = Vec::with_capacity(body.len() + 1);
        if self.compression {
            match snap::raw::Encoder::new().compress_vec(&body) {
                Ok(compressed) => {
                    frame.push(SNAPPY);
                    frame.extend(compressed);
                }
                Err(error) => {
                    error!("Unable to send because of compression, {}", error);
                    return None;
                }
            }
        } else {
            frame.push(PLAIN);
            frame.extend(body);
        }
        let header = match u32::try_from(frame.len()) {
            Ok(frame_length) => frame_length.to_be_bytes(),
            Err(error) => {
                error!("Unable to send because of body length {}", error);
                return None;
            }
        };
        if let Err(error) = self.writer.write_all(&header) {
            error!("Unable to send because of header write, {}", error);
            return None;
        }
        if let Err(error) = self.writer.write_all(&frame) {
            error!("Unable to send because of body write, {}", error);
            return None;
        }
        let sent = HEADER_LENGTH + frame.len();
        if let Some(metrics) = &self.metrics {
            metrics.sent_bytes.inc_by(sent as u64);
        }
        Some(sent)
    }

    pub fn send<T: serde::Serialize>(&mut self, value: &T) -> Option<usize> {
        match encode(value) {
            Ok(body) => self.send_body(body),
            Err(error) => {
                error!("Unable to send because of serialization, {}", error);
                None
            }
        }
    }
}

#[inline]
pub fn decode<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T, DecodeError> {
    let config = bincode::config::standard();
    let (response, _) = bincode::serde::decode_from_slice(data, config)?;
    Ok(response)
}

#[inline]
pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let config = bincode::config::standard();
    bincode::serde::encode_to_vec(value, config)
}
