use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::osc::OscError;

/// A single OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Float(f32),
    Int(i32),
    Str(String),
}

impl OscArg {
    /// Numeric value of `f` and `i` arguments.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            OscArg::Float(v) => Some(*v),
            OscArg::Int(v) => Some(*v as f32),
            OscArg::Str(_) => None,
        }
    }

    fn type_tag(&self) -> char {
        match self {
            OscArg::Float(_) => 'f',
            OscArg::Int(_) => 'i',
            OscArg::Str(_) => 's',
        }
    }
}

/// An OSC message: address pattern plus typed arguments.
///
/// Layout on the wire: NUL-terminated address padded to a multiple of four
/// bytes, a type tag string such as `,ff` padded the same way, then each
/// argument big-endian (`f`, `i`) or as another padded string (`s`).
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscArg>,
}

impl OscMessage {
    pub fn new(address: impl Into<String>, args: Vec<OscArg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// Parses one message from a datagram payload.
    ///
    /// # Errors
    /// See [`OscError`]. Bundles (`#bundle`) are reported as
    /// [`OscError::InvalidAddress`].
    pub fn parse(buf: &[u8]) -> Result<Self, OscError> {
        let mut cursor = Cursor::new(buf);

        let address = read_padded_string(&mut cursor)?;
        if !address.starts_with('/') {
            return Err(OscError::InvalidAddress(address));
        }

        if cursor.position() as usize >= buf.len() {
            return Err(OscError::MissingTypeTags);
        }
        let tags = read_padded_string(&mut cursor)?;
        let Some(tags) = tags.strip_prefix(',') else {
            return Err(OscError::MissingTypeTags);
        };

        let mut args = Vec::with_capacity(tags.len());
        for tag in tags.chars() {
            let arg = match tag {
                'f' => OscArg::Float(
                    cursor
                        .read_f32::<BigEndian>()
                        .map_err(|_| OscError::Truncated)?,
                ),
                'i' => OscArg::Int(
                    cursor
                        .read_i32::<BigEndian>()
                        .map_err(|_| OscError::Truncated)?,
                ),
                's' => OscArg::Str(read_padded_string(&mut cursor)?),
                other => return Err(OscError::UnsupportedType(other)),
            };
            args.push(arg);
        }

        Ok(Self { address, args })
    }

    /// Serializes the message into its wire form.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32);
        write_padded_string(&mut out, &self.address);

        let tags: String = std::iter::once(',')
            .chain(self.args.iter().map(OscArg::type_tag))
            .collect();
        write_padded_string(&mut out, &tags);

        for arg in &self.args {
            match arg {
                OscArg::Float(v) => out.extend_from_slice(&v.to_be_bytes()),
                OscArg::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
                OscArg::Str(s) => write_padded_string(&mut out, s),
            }
        }
        out
    }
}

fn read_padded_string(cursor: &mut Cursor<&[u8]>) -> Result<String, OscError> {
    let buf: &[u8] = *cursor.get_ref();
    let start = cursor.position() as usize;
    let rest = buf.get(start..).ok_or(OscError::Truncated)?;
    let nul = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(OscError::Truncated)?;

    let s = std::str::from_utf8(&rest[..nul])
        .map_err(|_| OscError::InvalidString)?
        .to_string();

    // Terminator included, rounded up to the next 4-byte boundary.
    let padded = (nul + 4) & !3;
    if padded > rest.len() {
        return Err(OscError::Truncated);
    }
    cursor.set_position((start + padded) as u64);
    Ok(s)
}

fn write_padded_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use byteorder::WriteBytesExt;

    /// Hand-built `/wek/outputs ,f 2.0` packet.
    fn wekinator_packet(value: f32) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(b"/wek/outputs\0\0\0\0"); // 12 chars + NUL, padded to 16
        p.extend_from_slice(b",f\0\0");
        p.write_f32::<BigEndian>(value).unwrap();
        p
    }

    #[test]
    fn parses_hand_built_packet() {
        let msg = OscMessage::parse(&wekinator_packet(2.0)).unwrap();
        assert_eq!(msg.address, "/wek/outputs");
        assert_eq!(msg.args, vec![OscArg::Float(2.0)]);
    }

    #[test]
    fn encode_matches_wire_layout() {
        let msg = OscMessage::new("/wek/outputs", vec![OscArg::Float(2.0)]);
        assert_eq!(msg.encode(), wekinator_packet(2.0));
    }

    #[test]
    fn mixed_arguments_survive_encoding() {
        let msg = OscMessage::new(
            "/wand",
            vec![OscArg::Int(-4), OscArg::Str("stir".into()), OscArg::Float(0.5)],
        );
        let bytes = msg.encode();
        assert_eq!(bytes.len() % 4, 0);
        assert_eq!(OscMessage::parse(&bytes).unwrap(), msg);
    }

    #[test]
    fn truncated_argument_is_rejected() {
        let mut p = wekinator_packet(1.0);
        p.truncate(p.len() - 2);
        assert_eq!(OscMessage::parse(&p), Err(OscError::Truncated));
    }

    #[test]
    fn bundles_and_plain_text_are_rejected() {
        let mut bundle = b"#bundle\0".to_vec();
        bundle.extend_from_slice(&[0u8; 8]);
        assert_eq!(
            OscMessage::parse(&bundle),
            Err(OscError::InvalidAddress("#bundle".into()))
        );
        assert_eq!(OscMessage::parse(b"Wave|10"), Err(OscError::Truncated));
    }

    #[test]
    fn missing_or_unknown_type_tags() {
        assert_eq!(OscMessage::parse(b"/a\0\0"), Err(OscError::MissingTypeTags));
        assert_eq!(OscMessage::parse(b"/a\0\0x\0\0\0"), Err(OscError::MissingTypeTags));
        assert_eq!(
            OscMessage::parse(b"/a\0\0,b\0\0"),
            Err(OscError::UnsupportedType('b'))
        );
    }
}
